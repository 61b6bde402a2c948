use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Degenerate projection: clip-space w is {w}")]
    DegenerateProjection { w: f32 },
    #[error("Invalid vertical field of view: {0} radians (must be in (0, pi))")]
    InvalidFieldOfView(f32),
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f32),
    #[error("Invalid depth range: near {near}, far {far}")]
    InvalidDepthRange { near: f32, far: f32 },
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scene parse error: {0}")]
    SceneParse(#[from] ron::error::SpannedError),
    #[error("Scene serialize error: {0}")]
    SceneSerialize(#[from] ron::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;

//! Software triangle rasterizer.
//!
//! Vertices go through the vertex stage (object to clip space), the screen mapper
//! (perspective divide and viewport mapping) and the rasterizer (edge functions,
//! perspective-correct interpolation, depth test, shading). The resulting color
//! buffer can be written out as a binary PPM.

pub mod error;
pub mod framebuffer;
pub mod math;
pub mod rasterizer;
pub mod rendercamera;
pub mod renderer;
pub mod scene;
pub mod screen;
pub mod shader;
pub mod texture;
pub mod util;
pub mod vertex;

pub use error::{RenderError, RenderResult};
pub use framebuffer::{DepthBuffer, RenderBuffer};
pub use rasterizer::{CullMode, FrontFace, RasterStats, Rasterizer, RasterizerSettings};
pub use rendercamera::RenderCamera;
pub use renderer::Renderer;
pub use scene::SceneConfig;
pub use screen::{RasterTriangle, ScreenVertex};
pub use shader::{Fragment, LambertShader, PixelShader, TexturedLambertShader};
pub use texture::{Texture, WrapMode};
pub use util::Color;
pub use vertex::{Vertex, VsOut};

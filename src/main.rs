use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use trirast::scene::{load_scene, save_scene};
use trirast::{
    CullMode, LambertShader, PixelShader, RenderResult, Renderer, SceneConfig,
    TexturedLambertShader, Texture,
};

#[derive(Parser, Clone)]
#[command(name = "trirast")]
#[command(about = "Software rasterizer that renders a single shaded triangle to a PPM file")]
struct Settings {
    /// RON scene file (defaults to the built-in reference scene)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Output PPM file
    #[arg(short, long, default_value = "triangle.ppm")]
    output: PathBuf,

    /// Override the image width
    #[arg(long)]
    width: Option<usize>,

    /// Override the image height
    #[arg(long)]
    height: Option<usize>,

    /// Shade with an image texture instead of greyscale diffuse
    #[arg(long, conflicts_with = "checker")]
    texture: Option<PathBuf>,

    /// Shade with a procedural checkerboard texture
    #[arg(long)]
    checker: bool,

    /// Draw back-facing triangles too
    #[arg(long)]
    no_cull: bool,

    /// Write the effective scene as RON
    #[arg(long)]
    save_scene: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(settings: &Settings) -> RenderResult<()> {
    let mut scene = match &settings.scene {
        Some(path) => {
            info!("Loading scene: {}", path.display());
            load_scene(path)?
        }
        None => SceneConfig::default(),
    };
    if let Some(width) = settings.width {
        scene.width = width;
    }
    if let Some(height) = settings.height {
        scene.height = height;
    }
    if settings.no_cull {
        scene.cull_mode = CullMode::None;
    }

    if let Some(path) = &settings.save_scene {
        save_scene(&scene, path)?;
        info!("Saved scene: {}", path.display());
    }

    let texture = if let Some(path) = &settings.texture {
        Some(Texture::load(path)?)
    } else if settings.checker {
        Some(Texture::checkerboard(64, 8, 255, 30)?)
    } else {
        None
    };
    let shader: Box<dyn PixelShader> = match texture {
        Some(texture) => Box::new(TexturedLambertShader::new(
            scene.light_direction,
            Arc::new(texture),
        )),
        None => Box::new(LambertShader::new(scene.light_direction)),
    };

    let mut renderer = Renderer::new(scene.width, scene.height, scene.rasterizer_settings())?;
    renderer.render_scene(&scene, shader.as_ref())?;
    renderer.save_ppm(&settings.output)
}

fn main() -> ExitCode {
    let settings = Settings::parse();

    let log_level = if settings.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

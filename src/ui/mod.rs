pub mod renderer;
pub mod surface;

pub use renderer::{RendererError, Scene, SceneLayout, SceneRenderer};
pub use surface::{RecordingSurface, Surface, SurfaceCall};

//! Three-cube scene demo
//!
//! Builds three spinning nodes in a row, propagates their world transforms
//! each frame and logs where the camera puts them on screen. Runs headless;
//! drawing is left to a real renderer.
//!
//! Usage: `scene_demo [config.toml|config.ron] [frames]`

use scene_engine::config::{Config, ConfigError, SceneConfig};
use scene_engine::foundation::logging;
use scene_engine::foundation::math::{Vec3, Viewport};
use scene_engine::render::Camera;
use scene_engine::scene::{walk, NodeId, NodeTree, SceneError, SceneGraph};

/// Distance between neighbouring cubes along X
const CUBE_SPACING: f32 = 250.0;

/// Frames to run when none are given on the command line
const DEFAULT_FRAMES: u32 = 120;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid frame count '{0}'")]
    FrameCount(String),
}

struct DemoApp {
    tree: NodeTree,
    graph: SceneGraph,
    cubes: [NodeId; 3],
    camera: Camera,
    viewport: Viewport,
}

impl DemoApp {
    fn new(config: &SceneConfig) -> Result<Self, DemoError> {
        log::info!("Creating three-cube scene...");
        let mut tree = NodeTree::new();
        let cubes = [tree.create(), tree.create(), tree.create()];
        for (i, &cube) in cubes.iter().enumerate() {
            let offset = (i as f32 - 1.0) * CUBE_SPACING;
            tree.get_mut(cube)
                .ok_or(SceneError::NodeNotFound(cube))?
                .translate_x(offset);
        }

        let mut graph = SceneGraph::new();
        graph.add_children(cubes);

        let viewport = Viewport::from(&config.viewport);
        let mut camera = Camera::from_config(&config.camera);
        camera.set_aspect_ratio(viewport.aspect_ratio());
        log::info!("Camera at {:?} looking at {:?}", camera.position, camera.target);

        Ok(Self {
            tree,
            graph,
            cubes,
            camera,
            viewport,
        })
    }

    fn update(&mut self) -> Result<(), DemoError> {
        for (i, &cube) in self.cubes.iter().enumerate() {
            let speed = (i + 1) as f32;
            let node = self.tree.get_mut(cube).ok_or(SceneError::NodeNotFound(cube))?;
            node.rotate_x(0.02 * speed);
            node.rotate_y(0.04 * speed);
        }
        self.graph.update_world_transforms(&mut self.tree);
        Ok(())
    }

    fn draw(&self, frame: u32) {
        walk(&self.graph, &self.tree, |id, node| {
            let window = self
                .camera
                .project(Vec3::ZERO, node.world_transform(), &self.viewport);
            let corner = node.local_to_world(Vec3::ONE);
            log::debug!(
                "frame {frame} node {id:?}: screen ({:.1}, {:.1}) depth {:.4}, corner {:?}",
                window.x,
                window.y,
                window.z,
                corner
            );
        });
    }

    fn run(&mut self, frames: u32) -> Result<(), DemoError> {
        log::info!("Running {frames} frames...");
        for frame in 0..frames {
            self.update()?;
            self.draw(frame);
        }

        let recomputed: u64 = self
            .cubes
            .iter()
            .filter_map(|&cube| self.tree.get(cube))
            .map(|node| node.transform_recomputations())
            .sum();
        log::info!("Done: {recomputed} local matrix rebuilds over {frames} frames");
        Ok(())
    }
}

fn load_config(path: Option<&str>) -> Result<SceneConfig, DemoError> {
    let config = match path {
        Some(path) => SceneConfig::load_from_file(path)?,
        None => SceneConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = load_config(args.first().map(String::as_str))?;
    if logging::init_with_level(&config.engine.log_level).is_err() {
        eprintln!("Logger already initialized");
    }
    log::info!("Starting scene demo");

    let frames = match args.get(1) {
        Some(arg) => arg
            .parse::<u32>()
            .map_err(|_| DemoError::FrameCount(arg.clone()))?,
        None => DEFAULT_FRAMES,
    };

    let mut app = DemoApp::new(&config)?;
    app.run(frames)?;

    log::info!("Scene demo finished");
    Ok(())
}

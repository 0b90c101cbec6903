use std::collections::HashMap;
use std::path::PathBuf;

use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::window::WindowId;

use prism_engine::coords::{ColorRgba, Vec2};
use prism_engine::core::{App as EngineApp, AppControl, FrameCtx, FrameOutcome};
use prism_engine::device::{GpuInit, WgpuFence};
use prism_engine::frame::{FrameRing, RingConfig, SceneState};
use prism_engine::gpu::CommandRecorder;
use prism_engine::input::{Key, MouseButton};
use prism_engine::render::OverlayRenderer;
use prism_engine::text::{GridAtlas, GridLayout};
use prism_engine::window::{Runtime, RuntimeConfig};

use crate::editor::{Editor, EditorConfig, EditorInput};
use crate::event::WidgetClick;
use crate::text::FontConfig;

/// Where the glyph atlas comes from.
#[derive(Debug, Clone, Default)]
pub enum AtlasSource {
    /// Outlined placeholder cells. Needs no assets.
    #[default]
    Blank,
    /// TrueType/OpenType bytes rasterised into the grid.
    Font(Vec<u8>),
    /// A pre-baked grid image.
    Png(PathBuf),
}

impl AtlasSource {
    fn resolve(&self, layout: GridLayout, cell_px: u32) -> GridAtlas {
        let loaded = match self {
            AtlasSource::Blank => return GridAtlas::blank(layout, cell_px),
            AtlasSource::Font(bytes) => GridAtlas::bake(bytes, layout, cell_px),
            AtlasSource::Png(path) => GridAtlas::load_png(path, layout),
        };
        loaded.unwrap_or_else(|e| {
            log::warn!("atlas unavailable ({e}), using placeholder glyphs");
            GridAtlas::blank(layout, cell_px)
        })
    }
}

/// What an action handler may touch.
pub struct ActionCtx<'a> {
    pub scene: &'a mut SceneState,
    pub click: &'a WidgetClick,
}

type ActionHandler = Box<dyn FnMut(&mut ActionCtx<'_>)>;

/// Builder for an editor window: the default overlay GUI on top of a frame
/// ring, with button actions routed to registered handlers.
///
/// ```rust,ignore
/// Application::new()
///     .title("Prism Studio")
///     .render_item("box")
///     .on_action("SpawnObject", |ctx| {
///         ctx.scene.spawn_in_front_of_camera(0);
///     })
///     .run();
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    ring: RingConfig,
    atlas: AtlasSource,
    cell_px: u32,
    clear: ColorRgba,
    render_items: Vec<String>,
    handlers: HashMap<String, ActionHandler>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "prism".to_string(),
            width: 1280.0,
            height: 720.0,
            ring: RingConfig::default(),
            atlas: AtlasSource::Blank,
            cell_px: 16,
            clear: ColorRgba::new(0.69, 0.77, 0.87, 1.0),
            render_items: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Number of frame resources in flight.
    pub fn frames(mut self, count: usize) -> Self {
        self.ring.frame_count = count;
        self
    }

    pub fn ring(mut self, config: RingConfig) -> Self {
        self.ring = config;
        self
    }

    pub fn atlas(mut self, source: AtlasSource) -> Self {
        self.atlas = source;
        self
    }

    /// Glyph cell edge in pixels when the atlas is generated.
    pub fn cell_px(mut self, px: u32) -> Self {
        self.cell_px = px.max(1);
        self
    }

    pub fn clear_color(mut self, color: ColorRgba) -> Self {
        self.clear = color;
        self
    }

    /// Registers a render item; items are numbered in call order from 0.
    pub fn render_item(mut self, name: impl Into<String>) -> Self {
        self.render_items.push(name.into());
        self
    }

    /// Runs `f` whenever a button with this action fires.
    pub fn on_action<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&mut ActionCtx<'_>) + 'static,
    {
        self.handlers.insert(name.into(), Box::new(f));
        self
    }

    /// Builds the editor and starts the event loop. Returns once the window
    /// closes.
    pub fn run(self) -> anyhow::Result<()> {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = EditorApp::new(self)?;
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── EditorApp ─────────────────────────────────────────────────────────────

/// Engine-facing side of [`Application`].
struct EditorApp {
    editor: Editor,
    scene: SceneState,
    ring_config: RingConfig,
    ring: Option<FrameRing<WgpuFence>>,
    overlay: OverlayRenderer,
    commands: CommandRecorder,
    text_indices_uploaded: bool,
    gui_index_count: usize,
    clear: ColorRgba,
    handlers: HashMap<String, ActionHandler>,
}

impl EditorApp {
    fn new(app: Application) -> anyhow::Result<Self> {
        let layout = GridLayout::default();
        let atlas = app.atlas.resolve(layout, app.cell_px);

        let font = FontConfig {
            columns: layout.columns,
            rows: layout.rows,
            first: layout.first,
            atlas_width: atlas.width(),
            atlas_height: atlas.height(),
            ..FontConfig::default()
        };
        let editor = Editor::with_default_gui(EditorConfig {
            font,
            ..EditorConfig::default()
        })?;

        let mut scene = SceneState::new(&app.ring.sizing);
        for name in app.render_items {
            scene.add_render_item(name)?;
        }

        Ok(Self {
            editor,
            scene,
            ring_config: app.ring,
            ring: None,
            overlay: OverlayRenderer::new(atlas),
            commands: CommandRecorder::new(),
            text_indices_uploaded: false,
            gui_index_count: 0,
            clear: app.clear,
            handlers: app.handlers,
        })
    }

    fn dispatch_actions(&mut self) {
        for click in self.editor.drain_clicks() {
            let Some(action) = click.action.as_deref() else {
                continue;
            };
            match self.handlers.get_mut(action) {
                Some(handler) => handler(&mut ActionCtx {
                    scene: &mut self.scene,
                    click: &click,
                }),
                None => log::debug!("no handler for action '{action}'"),
            }
        }
    }

    fn shutdown(&self) {
        if let Some(Err(e)) = self.ring.as_ref().map(|ring| ring.wait_idle()) {
            log::error!("gpu did not drain on shutdown: {e}");
        }
    }
}

impl EngineApp for EditorApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::CloseRequested) {
            self.shutdown();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            self.shutdown();
            return AppControl::Exit;
        }

        // ── Input ─────────────────────────────────────────────────────────
        let viewport = ctx.viewport();
        self.editor.set_viewport(viewport);
        let input = EditorInput {
            presses: ctx
                .input_frame
                .presses
                .iter()
                .filter(|p| p.button == MouseButton::Left)
                .map(|p| Vec2::new(p.x, p.y))
                .collect(),
            wheel_lines: ctx.input_frame.wheel_lines,
        };
        if let Err(e) = self.editor.handle_input(&input) {
            log::error!("editor input failed: {e}");
            self.shutdown();
            return AppControl::Exit;
        }
        self.dispatch_actions();

        // ── Update ────────────────────────────────────────────────────────
        let ring = self
            .ring
            .get_or_insert_with(|| FrameRing::new(self.ring_config, ctx.gpu.fence()));
        let slot = match ring.advance() {
            Ok(slot) => slot,
            Err(e) => {
                log::error!("frame ring stalled: {e}");
                return AppControl::Exit;
            }
        };

        let size = ctx.gpu.size();
        if let Err(e) = self
            .scene
            .write_into(ring.current_mut(), ctx.time, [size.width, size.height])
        {
            log::error!("scene update failed: {e}");
            self.shutdown();
            return AppControl::Exit;
        }
        if let Err(e) = self.editor.update(ring.current_mut(), ctx.time.dt) {
            log::error!("editor update failed: {e}");
            self.shutdown();
            return AppControl::Exit;
        }

        self.commands.clear();
        self.editor.submit_draws(&mut self.commands);
        // Widget indices only grow; the glyph pool never changes.
        let gui_indices = self.editor.gui_indices();
        if gui_indices.len() != self.gui_index_count {
            self.overlay.set_gui_indices(gui_indices);
            self.gui_index_count = gui_indices.len();
        }
        if !self.text_indices_uploaded {
            self.overlay.set_text_indices(self.editor.text_indices());
            self.text_indices_uploaded = true;
        }

        // ── Submit + present ──────────────────────────────────────────────
        let overlay = &mut self.overlay;
        let commands = &self.commands;
        let frame = ring.current_mut();
        let outcome = ctx.render(self.clear, |rctx, target| {
            overlay.render(rctx, target, slot, frame, commands);
        });

        match outcome {
            FrameOutcome::Submitted => {
                ring.submit();
                AppControl::Continue
            }
            FrameOutcome::Skipped => AppControl::Continue,
            FrameOutcome::Exit => {
                self.shutdown();
                AppControl::Exit
            }
        }
    }
}

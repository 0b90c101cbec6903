use prism_engine::coords::{ColorRgba, NdcRect, Vec2, Viewport};
use prism_engine::frame::{FrameResource, GuiData};
use prism_engine::gpu::{CommandSink, PipelineKind};

use crate::error::{EditorError, WidgetError};
use crate::event::WidgetClick;
use crate::geometry::GeometryAggregate;
use crate::interaction::{self, ClickOutcome, InteractionState, ScrollDirection};
use crate::text::{FontConfig, MonoFont, Text, TextId, TextStore};
use crate::widget::{
    ButtonState, PanelState, ScrollBoxState, Widget, WidgetArena, WidgetId, WidgetKind,
    WidgetVariant,
};

// ── EditorConfig ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Window size in pixels, used to map pointer positions to NDC.
    pub viewport: Viewport,
    pub font: FontConfig,
    /// Font size of panel titles.
    pub title_font_size: f32,
    /// Font size of scroll box value labels.
    pub value_font_size: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1280.0, 720.0),
            font: FontConfig::default(),
            title_font_size: 7.0,
            value_font_size: 5.0,
        }
    }
}

// ── EditorInput ───────────────────────────────────────────────────────────

/// Input gathered for one frame, in window pixels.
///
/// Build this from the engine's `InputFrame` each frame.
#[derive(Debug, Clone, Default)]
pub struct EditorInput {
    /// Primary-button presses, oldest first.
    pub presses: Vec<Vec2>,
    /// Accumulated vertical wheel lines. Positive scrolls up.
    pub wheel_lines: f32,
}

// ── Editor ────────────────────────────────────────────────────────────────

type ClickListener = Box<dyn FnMut(&WidgetClick)>;

/// The overlay GUI: widgets, their labels, the packed geometry and the
/// interaction state, driven by one frame loop.
///
/// Per frame the host calls [`handle_input`](Self::handle_input) (or the
/// individual pointer and scroll entry points), then [`update`](Self::update)
/// against the frame resource the ring just advanced to, then
/// [`submit_draws`](Self::submit_draws).
pub struct Editor {
    config: EditorConfig,
    arena: WidgetArena,
    texts: TextStore,
    geometry: GeometryAggregate,
    interaction: InteractionState,
    clicks: Vec<WidgetClick>,
    listener: Option<ClickListener>,
    geometry_built: bool,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        let font = MonoFont::new(config.font)?;
        let vertex_capacity = config.font.quad_capacity.saturating_mul(4);
        Ok(Self {
            config,
            arena: WidgetArena::new(),
            texts: TextStore::new(font, vertex_capacity),
            geometry: GeometryAggregate::new(),
            interaction: InteractionState::new(),
            clicks: Vec::new(),
            listener: None,
            geometry_built: false,
        })
    }

    /// The stock editor overlay: a collapsible side panel holding one scroll
    /// box and a "SpawnObject" button. The panel starts collapsed.
    pub fn with_default_gui(config: EditorConfig) -> Result<Self, EditorError> {
        let mut editor = Self::new(config)?;

        let panel = editor.add_panel(
            "MainPanel",
            NdcRect::new(0.8, 1.0, 0.4, 1.5),
            ColorRgba::new(0.5, 0.5, 0.5, 0.8),
            1,
        )?;
        let scroll_box = editor.add_scroll_box(
            panel,
            "Scrollbox1",
            NdcRect::new(0.81, 0.8, 0.06, 0.08),
            ColorRgba::new(0.0, 0.0, 1.0, 1.0),
            2,
        )?;
        editor.add_button(
            panel,
            "Button1",
            NdcRect::new(0.81, 0.5, 0.12, 0.05),
            ColorRgba::new(0.0, 0.5, 0.0, 1.0),
            2,
            "SpawnObject",
        )?;

        editor.add_label(panel, "test", Vec2::zero(), config.title_font_size)?;
        editor.add_label(scroll_box, "0", Vec2::zero(), config.value_font_size)?;

        editor.rebuild_geometry()?;
        editor.set_panel_collapsed(panel, true)?;
        log::info!(
            "editor gui ready: {} widgets, {} text vertices",
            editor.arena.len(),
            editor.texts.next_vertex()
        );
        Ok(editor)
    }

    // ── construction ──────────────────────────────────────────────────────

    pub fn add_panel(
        &mut self,
        name: &str,
        rect: NdcRect,
        color: ColorRgba,
        depth: u32,
    ) -> Result<WidgetId, EditorError> {
        let variant = WidgetVariant::Panel(PanelState::new());
        self.insert(name, rect, color, depth, variant)
    }

    pub fn add_scroll_box(
        &mut self,
        panel: WidgetId,
        name: &str,
        rect: NdcRect,
        color: ColorRgba,
        depth: u32,
    ) -> Result<WidgetId, EditorError> {
        let variant = WidgetVariant::ScrollBox(ScrollBoxState::default());
        self.insert_child(panel, name, rect, color, depth, variant)
    }

    pub fn add_button(
        &mut self,
        panel: WidgetId,
        name: &str,
        rect: NdcRect,
        color: ColorRgba,
        depth: u32,
        action: &str,
    ) -> Result<WidgetId, EditorError> {
        let variant = WidgetVariant::Button(ButtonState::new(action));
        self.insert_child(panel, name, rect, color, depth, variant)
    }

    fn insert_child(
        &mut self,
        panel: WidgetId,
        name: &str,
        rect: NdcRect,
        color: ColorRgba,
        depth: u32,
        variant: WidgetVariant,
    ) -> Result<WidgetId, EditorError> {
        if self.arena.get(panel)?.as_panel().is_none() {
            return Err(WidgetError::NotA {
                id: panel,
                expected: WidgetKind::Panel,
            }
            .into());
        }
        let id = self.insert(name, rect, color, depth, variant)?;
        self.arena.attach_child(panel, id)?;
        let expanded = self
            .arena
            .get(panel)?
            .as_panel()
            .is_some_and(|p| !p.is_collapsed());
        self.arena.get_mut(id)?.set_visible(expanded);
        self.sync_label(id)?;
        Ok(id)
    }

    fn insert(
        &mut self,
        name: &str,
        rect: NdcRect,
        color: ColorRgba,
        depth: u32,
        variant: WidgetVariant,
    ) -> Result<WidgetId, EditorError> {
        let slot = self.arena.len();
        let widget = Widget::new(name, rect, color, depth, slot, variant)?;
        let id = self.arena.insert(widget)?;
        if self.geometry_built {
            self.geometry.append(id, self.arena.get(id)?)?;
        }
        Ok(id)
    }

    /// Lays out `content` at the widget's top-left plus `offset` and attaches
    /// it as the widget's label.
    pub fn add_label(
        &mut self,
        widget: WidgetId,
        content: &str,
        offset: Vec2,
        font_size: f32,
    ) -> Result<TextId, EditorError> {
        let w = self.arena.get(widget)?;
        let origin = w.rect().origin;
        let visible = w.is_visible();
        let id = self
            .texts
            .layout_text(content, widget, origin, offset, font_size)?;
        self.texts.set_visible(id, visible)?;
        self.arena.get_mut(widget)?.set_label(id);
        Ok(id)
    }

    /// Packs every widget quad into a fresh aggregate. Widgets added
    /// afterwards are appended to it.
    pub fn rebuild_geometry(&mut self) -> Result<(), EditorError> {
        self.geometry = GeometryAggregate::build(&self.arena)?;
        self.geometry_built = true;
        Ok(())
    }

    /// Collapses or expands a panel outside of click handling.
    pub fn set_panel_collapsed(
        &mut self,
        panel: WidgetId,
        collapse: bool,
    ) -> Result<(), EditorError> {
        let children = self.arena.change_panel_size(panel, collapse)?;
        for &child in &children {
            self.sync_label(child)?;
        }
        self.refresh_quad(panel)
    }

    fn refresh_quad(&mut self, id: WidgetId) -> Result<(), EditorError> {
        let widget = self.arena.get(id)?;
        if self.geometry.sub_geometry(widget.name()).is_some() {
            self.geometry.update_partial(widget)?;
        }
        Ok(())
    }

    fn sync_label(&mut self, id: WidgetId) -> Result<(), EditorError> {
        let widget = self.arena.get(id)?;
        if let Some(label) = widget.label() {
            self.texts.set_visible(label, widget.is_visible())?;
        }
        Ok(())
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Topmost visible widget under a pixel position.
    pub fn get_widget_at(&self, screen_x: f32, screen_y: f32) -> Option<WidgetId> {
        interaction::hit_test(&self.arena, self.config.viewport, screen_x, screen_y)
    }

    /// Feeds one frame of input: every press in order, then the wheel.
    pub fn handle_input(&mut self, input: &EditorInput) -> Result<(), EditorError> {
        for press in &input.presses {
            self.on_pointer_down(press.x, press.y)?;
        }
        if let Some(direction) = ScrollDirection::from_lines(input.wheel_lines) {
            self.on_scroll(direction)?;
        }
        Ok(())
    }

    /// Picks and dispatches a press. Returns `None` when nothing was hit.
    pub fn on_pointer_down(
        &mut self,
        screen_x: f32,
        screen_y: f32,
    ) -> Result<Option<ClickOutcome>, EditorError> {
        let Some(id) = self.get_widget_at(screen_x, screen_y) else {
            return Ok(None);
        };
        let outcome = interaction::dispatch_click(&mut self.arena, &mut self.interaction, id)?;

        let action = match &outcome {
            ClickOutcome::PanelToggled { children, .. } => {
                for &child in children {
                    self.sync_label(child)?;
                }
                None
            }
            ClickOutcome::Focused(_) | ClickOutcome::Unfocused(_) => None,
            ClickOutcome::Action { action, .. } => Some(action.clone()),
            ClickOutcome::Suppressed { target, focused } => {
                log::trace!("click on {target:?} ignored while {focused:?} has focus");
                return Ok(Some(outcome));
            }
        };
        if let Some(changed) = outcome.geometry_changed() {
            self.refresh_quad(changed)?;
        }

        let widget = self.arena.get(id)?;
        let click = WidgetClick {
            kind: widget.kind(),
            id,
            name: widget.name().to_owned(),
            action,
        };
        log::debug!("widget clicked: {} ({:?})", click.name, click.kind);
        if let Some(listener) = self.listener.as_mut() {
            listener(&click);
        }
        self.clicks.push(click);
        Ok(Some(outcome))
    }

    /// Steps the focused scroll box and rewrites its label glyphs.
    pub fn on_scroll(&mut self, direction: ScrollDirection) -> Result<Option<WidgetId>, EditorError> {
        let Some((id, text)) = interaction::on_scroll(&mut self.arena, &self.interaction, direction)?
        else {
            return Ok(None);
        };
        if let Some(label) = self.arena.get(id)?.label() {
            self.texts.relayout_uvs(label, &text)?;
        }
        Ok(Some(id))
    }

    /// Registers a callback run for every handled click, in addition to the
    /// queue read by [`drain_clicks`](Self::drain_clicks).
    pub fn on_widget_clicked<F>(&mut self, listener: F)
    where
        F: FnMut(&WidgetClick) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn drain_clicks(&mut self) -> Vec<WidgetClick> {
        std::mem::take(&mut self.clicks)
    }

    // ── per frame ─────────────────────────────────────────────────────────

    /// Rewrites the GUI colors, GUI vertices and text vertices of `frame`.
    ///
    /// `frame` must be the resource the ring just advanced to.
    pub fn update(&mut self, frame: &mut FrameResource, dt: f32) -> Result<(), EditorError> {
        check_capacity("gui_data", self.arena.len(), frame.gui_data.capacity())?;
        check_capacity(
            "gui_vertices",
            self.geometry.vertices().len(),
            frame.gui_vertices.capacity(),
        )?;
        check_capacity(
            "text_vertices",
            self.texts.next_vertex() as usize,
            frame.text_vertices.capacity(),
        )?;

        for (_, widget) in self.arena.iter() {
            frame.gui_data.copy_data(
                widget.color_slot(),
                &GuiData {
                    color: widget.color().to_array(),
                },
            );
        }
        self.geometry.write_vertices(&mut frame.gui_vertices);

        self.texts.sync_instance_counts();
        self.texts.write_vertices(&mut frame.text_vertices);

        log::trace!(
            "gui frame written: {} widgets, {} text vertices, dt {dt:.4}",
            self.arena.len(),
            self.texts.next_vertex()
        );
        Ok(())
    }

    /// Issues the GUI pass then the text pass.
    ///
    /// Hidden widgets are skipped. Every text gets a draw; hidden ones carry
    /// zero instances.
    pub fn submit_draws(&self, sink: &mut dyn CommandSink) {
        sink.set_pipeline(PipelineKind::Gui);
        for &(id, sub) in self.geometry.entries() {
            let Ok(widget) = self.arena.get(id) else {
                continue;
            };
            if widget.is_visible() {
                sink.draw_indexed(sub.draw(widget.color_slot() as u32));
            }
        }

        sink.set_pipeline(PipelineKind::Text);
        for (_, text) in self.texts.iter() {
            if text.char_count() > 0 {
                sink.draw_indexed(text.draw());
            }
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[inline]
    pub fn arena(&self) -> &WidgetArena {
        &self.arena
    }

    pub fn widget(&self, id: WidgetId) -> Result<&Widget, EditorError> {
        Ok(self.arena.get(id)?)
    }

    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.arena.find(name)
    }

    #[inline]
    pub fn texts(&self) -> &TextStore {
        &self.texts
    }

    pub fn text(&self, id: TextId) -> Result<&Text, EditorError> {
        Ok(self.texts.get(id)?)
    }

    #[inline]
    pub fn geometry(&self) -> &GeometryAggregate {
        &self.geometry
    }

    #[inline]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Index list for the GUI pass.
    #[inline]
    pub fn gui_indices(&self) -> &[u16] {
        self.geometry.indices()
    }

    /// Shared glyph index pool for the text pass.
    #[inline]
    pub fn text_indices(&self) -> &[u16] {
        self.texts.index_pool().indices()
    }
}

fn check_capacity(buffer: &'static str, required: usize, capacity: usize) -> Result<(), EditorError> {
    if required > capacity {
        return Err(EditorError::FrameCapacity {
            buffer,
            required,
            capacity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use prism_engine::frame::FrameResourceSizing;
    use prism_engine::gpu::{CommandRecorder, RecordedCommand};

    use crate::error::TextError;

    const VP: Viewport = Viewport::new(1000.0, 1000.0);

    fn config() -> EditorConfig {
        EditorConfig {
            viewport: VP,
            ..EditorConfig::default()
        }
    }

    /// Pixel position of an NDC point on the 1000x1000 test viewport.
    fn px(x: f32, y: f32) -> (f32, f32) {
        ((x + 1.0) * 500.0, (1.0 - y) * 500.0)
    }

    fn default_editor() -> Editor {
        Editor::with_default_gui(config()).unwrap()
    }

    fn frame() -> FrameResource {
        FrameResource::new(&FrameResourceSizing::default())
    }

    fn id(editor: &Editor, name: &str) -> WidgetId {
        editor.find(name).unwrap()
    }

    fn expand(editor: &mut Editor) {
        let (x, y) = px(0.9, 0.95);
        let out = editor.on_pointer_down(x, y).unwrap();
        assert!(matches!(
            out,
            Some(ClickOutcome::PanelToggled {
                collapsed: false,
                ..
            })
        ));
    }

    // ── default gui ───────────────────────────────────────────────────────

    #[test]
    fn default_gui_starts_collapsed() {
        let editor = default_editor();
        let panel = editor.widget(id(&editor, "MainPanel")).unwrap();
        assert!(panel.as_panel().unwrap().is_collapsed());
        assert!((panel.rect().size.y - 0.1).abs() < 1e-6);

        for name in ["Scrollbox1", "Button1"] {
            assert!(!editor.widget(id(&editor, name)).unwrap().is_visible());
        }
        let value_label = editor
            .widget(id(&editor, "Scrollbox1"))
            .unwrap()
            .label()
            .unwrap();
        assert!(!editor.text(value_label).unwrap().is_visible());
        assert_eq!(editor.texts().next_vertex(), 4 * ("test".len() + "0".len()) as u32);
    }

    #[test]
    fn collapse_example_bottom_left() {
        let mut editor = Editor::new(config()).unwrap();
        let panel = editor
            .add_panel(
                "P",
                NdcRect::new(0.1, 0.9, 0.4, 1.0),
                ColorRgba::white(),
                1,
            )
            .unwrap();
        editor.rebuild_geometry().unwrap();
        editor.set_panel_collapsed(panel, true).unwrap();

        let bl = |e: &Editor| e.geometry().vertices()[0].position;
        assert!((bl(&editor)[0] - 0.1).abs() < 1e-6);
        assert!((bl(&editor)[1] - 0.8).abs() < 1e-6);

        editor.set_panel_collapsed(panel, false).unwrap();
        assert!((bl(&editor)[1] - (-0.1)).abs() < 1e-6);
        assert_eq!(editor.widget(panel).unwrap().rect().top(), 0.9);
    }

    // ── clicks ────────────────────────────────────────────────────────────

    #[test]
    fn clicking_collapsed_panel_expands_it() {
        let mut editor = default_editor();
        expand(&mut editor);
        assert!(editor.widget(id(&editor, "Button1")).unwrap().is_visible());
        let clicks = editor.drain_clicks();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].kind, WidgetKind::Panel);
        assert!(editor.drain_clicks().is_empty());
    }

    #[test]
    fn button_click_emits_action() {
        let mut editor = default_editor();
        expand(&mut editor);
        editor.drain_clicks();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        editor.on_widget_clicked(move |c| sink.borrow_mut().push(c.name.clone()));

        let (x, y) = px(0.85, 0.48);
        editor.on_pointer_down(x, y).unwrap();
        let clicks = editor.drain_clicks();
        assert_eq!(clicks.len(), 1);
        assert!(clicks[0].is_action("SpawnObject"));
        assert_eq!(seen.borrow().as_slice(), &["Button1".to_string()]);
    }

    #[test]
    fn click_on_empty_space_hits_nothing() {
        let mut editor = default_editor();
        let (x, y) = px(-0.5, -0.5);
        assert_eq!(editor.get_widget_at(x, y), None);
        assert_eq!(editor.on_pointer_down(x, y).unwrap(), None);
        assert!(editor.drain_clicks().is_empty());
    }

    #[test]
    fn focused_scroll_box_blocks_panel_toggle() {
        let mut editor = default_editor();
        expand(&mut editor);
        let (bx, by) = px(0.84, 0.76);
        assert!(matches!(
            editor.on_pointer_down(bx, by).unwrap(),
            Some(ClickOutcome::Focused(_))
        ));

        let (x, y) = px(0.9, 0.95);
        assert!(matches!(
            editor.on_pointer_down(x, y).unwrap(),
            Some(ClickOutcome::Suppressed { .. })
        ));
        let panel = editor.widget(id(&editor, "MainPanel")).unwrap();
        assert!(!panel.as_panel().unwrap().is_collapsed());
    }

    // ── scrolling ─────────────────────────────────────────────────────────

    #[test]
    fn scroll_rewrites_value_label_glyph() {
        let mut editor = default_editor();
        expand(&mut editor);
        let (bx, by) = px(0.84, 0.76);
        editor.on_pointer_down(bx, by).unwrap();

        let sb = id(&editor, "Scrollbox1");
        let label = editor.widget(sb).unwrap().label().unwrap();
        let positions = editor.text(label).unwrap().positions().to_vec();

        editor
            .handle_input(&EditorInput {
                presses: Vec::new(),
                wheel_lines: 1.0,
            })
            .unwrap();
        let state = editor.widget(sb).unwrap().as_scroll_box().unwrap();
        assert_eq!(state.text(), "1");

        let text = editor.text(label).unwrap();
        let [u, v, ..] = editor.texts().font().uv_rect('1').unwrap();
        assert_eq!(text.uvs()[0], [u, v]);
        assert_eq!(text.positions(), positions.as_slice());
    }

    #[test]
    fn scroll_down_from_zero_reads_minus_one() {
        let mut editor = default_editor();
        expand(&mut editor);
        let (bx, by) = px(0.84, 0.76);
        editor.on_pointer_down(bx, by).unwrap();
        editor.on_scroll(ScrollDirection::Down).unwrap();

        let sb = id(&editor, "Scrollbox1");
        let state = editor.widget(sb).unwrap().as_scroll_box().unwrap();
        assert_eq!(state.value(), -1);
        assert_eq!(state.text(), "-1");
    }

    // ── frame upload and draws ────────────────────────────────────────────

    #[test]
    fn update_writes_colors_and_vertices() {
        let mut editor = default_editor();
        let mut frame = frame();
        editor.update(&mut frame, 0.016).unwrap();

        let button = editor.widget(id(&editor, "Button1")).unwrap();
        assert_eq!(
            frame.gui_data.get(button.color_slot()).unwrap().color,
            [0.0, 0.5, 0.0, 1.0]
        );
        assert_eq!(
            &frame.gui_vertices.as_slice()[..editor.geometry().vertices().len()],
            editor.geometry().vertices()
        );
        let title = editor
            .widget(id(&editor, "MainPanel"))
            .unwrap()
            .label()
            .unwrap();
        assert_eq!(
            frame.text_vertices.get(0).unwrap().position,
            editor.text(title).unwrap().positions()[0]
        );
    }

    #[test]
    fn update_rejects_undersized_frame() {
        let mut editor = default_editor();
        let mut frame = FrameResource::new(&FrameResourceSizing {
            gui_slot_count: 2,
            ..FrameResourceSizing::default()
        });
        assert_eq!(
            editor.update(&mut frame, 0.0),
            Err(EditorError::FrameCapacity {
                buffer: "gui_data",
                required: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn collapsed_gui_draws_only_the_panel() {
        let mut editor = default_editor();
        let mut frame = frame();
        editor.update(&mut frame, 0.0).unwrap();
        let mut rec = CommandRecorder::new();
        editor.submit_draws(&mut rec);

        let cmds = rec.commands();
        assert_eq!(cmds[0], RecordedCommand::SetPipeline(PipelineKind::Gui));
        assert!(matches!(cmds[1], RecordedCommand::Draw(d) if d.first_instance == 0));
        assert_eq!(cmds[2], RecordedCommand::SetPipeline(PipelineKind::Text));

        let text_draws: Vec<_> = cmds[3..]
            .iter()
            .filter_map(|c| match c {
                RecordedCommand::Draw(d) => Some(*d),
                _ => None,
            })
            .collect();
        assert_eq!(text_draws.len(), 2);
        assert_eq!(text_draws[0].instance_count, 1);
        assert_eq!(text_draws[1].instance_count, 0);
        assert_eq!(text_draws[1].base_vertex, 16);
    }

    #[test]
    fn expanded_gui_draws_every_widget() {
        let mut editor = default_editor();
        expand(&mut editor);
        let mut frame = frame();
        editor.update(&mut frame, 0.0).unwrap();
        let mut rec = CommandRecorder::new();
        editor.submit_draws(&mut rec);
        assert_eq!(rec.draws().count(), 3 + 2);
        assert!(rec.draws().all(|d| d.instance_count == 1));
    }

    // ── widgets added after build ─────────────────────────────────────────

    fn add_late_button(editor: &mut Editor) -> WidgetId {
        let panel = id(editor, "MainPanel");
        editor
            .add_button(
                panel,
                "Late",
                NdcRect::new(0.81, 0.3, 0.1, 0.05),
                ColorRgba::new(1.0, 0.0, 0.0, 1.0),
                3,
                "Late",
            )
            .unwrap()
    }

    #[test]
    fn child_added_to_collapsed_panel_starts_hidden() {
        let mut editor = default_editor();
        let late = add_late_button(&mut editor);
        assert!(!editor.widget(late).unwrap().is_visible());

        let label = editor.add_label(late, "go", Vec2::zero(), 5.0).unwrap();
        assert!(!editor.text(label).unwrap().is_visible());

        let (x, y) = px(0.86, 0.275);
        assert_eq!(editor.get_widget_at(x, y), None);
        assert_eq!(editor.on_pointer_down(x, y).unwrap(), None);

        expand(&mut editor);
        assert!(editor.widget(late).unwrap().is_visible());
        assert!(editor.text(label).unwrap().is_visible());
        assert_eq!(editor.get_widget_at(x, y), Some(late));
    }

    #[test]
    fn child_added_to_expanded_panel_is_visible() {
        let mut editor = default_editor();
        expand(&mut editor);
        let late = add_late_button(&mut editor);
        assert!(editor.widget(late).unwrap().is_visible());
    }

    #[test]
    fn widget_added_after_build_is_appended_and_drawn() {
        let mut editor = default_editor();
        expand(&mut editor);
        let late = add_late_button(&mut editor);

        let sub = editor.geometry().sub_geometry("Late").unwrap();
        assert_eq!(sub.base_vertex, 12);
        assert_eq!(sub.start_index, 18);
        assert_eq!(editor.gui_indices().len(), 24);

        let mut frame = frame();
        editor.update(&mut frame, 0.0).unwrap();
        let mut rec = CommandRecorder::new();
        editor.submit_draws(&mut rec);
        let slot = editor.widget(late).unwrap().color_slot() as u32;
        assert!(rec.draws().any(|d| d.first_instance == slot && d.base_vertex == 12));
        assert_eq!(
            frame.gui_data.get(slot as usize).unwrap().color,
            [1.0, 0.0, 0.0, 1.0]
        );
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn labels_reject_unsupported_chars() {
        let mut editor = default_editor();
        let panel = id(&editor, "MainPanel");
        assert_eq!(
            editor.add_label(panel, "naïve", Vec2::zero(), 5.0),
            Err(EditorError::Text(TextError::UnsupportedChar('ï')))
        );
    }

    #[test]
    fn degenerate_widgets_are_rejected() {
        let mut editor = Editor::new(config()).unwrap();
        assert!(matches!(
            editor.add_panel("P", NdcRect::new(0.0, 0.0, 0.5, -0.1), ColorRgba::white(), 1),
            Err(EditorError::Widget(WidgetError::NonPositiveSize { .. }))
        ));
    }

    #[test]
    fn children_need_a_panel_parent() {
        let mut editor = default_editor();
        let button = id(&editor, "Button1");
        assert!(matches!(
            editor.add_button(
                button,
                "Nested",
                NdcRect::new(0.0, 0.0, 0.1, 0.1),
                ColorRgba::white(),
                3,
                "x"
            ),
            Err(EditorError::Widget(WidgetError::NotA { .. }))
        ));
    }
}

/// Pipelines the overlay switches between.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PipelineKind {
    /// Flat-colored widget quads.
    Gui,
    /// Atlas-sampled glyph quads.
    Text,
}

/// Arguments of one indexed, instanced draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawIndexed {
    pub index_count: u32,
    pub instance_count: u32,
    pub start_index: u32,
    pub base_vertex: i32,
    pub first_instance: u32,
}

/// Receives draw commands for one frame.
pub trait CommandSink {
    fn set_pipeline(&mut self, pipeline: PipelineKind);
    fn draw_indexed(&mut self, draw: DrawIndexed);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RecordedCommand {
    SetPipeline(PipelineKind),
    Draw(DrawIndexed),
}

/// Buffers commands so they can be replayed into a render pass later.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<RecordedCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Draws only, in recording order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawIndexed> {
        self.commands.iter().filter_map(|c| match c {
            RecordedCommand::Draw(d) => Some(d),
            RecordedCommand::SetPipeline(_) => None,
        })
    }
}

impl CommandSink for CommandRecorder {
    fn set_pipeline(&mut self, pipeline: PipelineKind) {
        self.commands.push(RecordedCommand::SetPipeline(pipeline));
    }

    fn draw_indexed(&mut self, draw: DrawIndexed) {
        self.commands.push(RecordedCommand::Draw(draw));
    }
}

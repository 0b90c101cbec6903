/// A button carries an action name that is emitted upward when it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub action: String,
}

impl ButtonState {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}

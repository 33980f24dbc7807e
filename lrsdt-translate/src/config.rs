/// Knobs of the three-address translator.
///
/// ```rust
/// # use lrsdt_translate::Options;
/// let opts = Options::new().check_declarations(true);
/// assert!(opts.checks_declarations());
/// assert!(!Options::default().checks_declarations());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    check_declarations: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject identifiers used in expressions before they are declared.
    /// Array names are always checked, since addressing needs their sizes.
    pub fn check_declarations(mut self, yes: bool) -> Self {
        self.check_declarations = yes;
        self
    }

    pub fn checks_declarations(&self) -> bool {
        self.check_declarations
    }
}

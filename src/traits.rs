//! Declaration of traits reused across the code.

/// Implementation of the LayoutDisplay trait.
/// It is used to render the layout facts of a structure such as a disk or a volume
/// as lines of text.
pub trait LayoutDisplay {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error>;
}

//! The different rendering styles a run of text can have.

/// The style of a run, deciding which font of the set renders it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleClass {
    /// Plain tile text.
    Regular,

    /// Text inside a `<b>` span.
    Bold,

    /// One of the singled out marks, `!` or `'`, always rendered with the
    /// marks font whatever the surrounding style is.
    Punctuation,
}

//! The built in tile templates.

/// A ready made tile text that can seed a project.
#[derive(Debug, Copy, Clone)]
pub struct TileTemplate {
    /// The identifier of the template.
    pub id: u32,

    /// The display name of the template.
    pub name: &'static str,

    /// The tile text, with its bold markup.
    pub text: &'static str,

    /// A single line preview of the text, markup stripped.
    pub preview: &'static str,
}

/// The catalog of built in templates.
const TEMPLATES: [TileTemplate; 3] = [
    TileTemplate {
        id: 1,
        name: "Verjaardag Tegel",
        text: "Ben ik verdorie\n<b>28</b>\ngeworden krijg ik\nzo'n achterlijk\n<b>kut tegeltje</b>",
        preview: "Ben ik verdorie 28 geworden krijg ik zo'n achterlijk kut tegeltje",
    },
    TileTemplate {
        id: 2,
        name: "Voetbal Tegel",
        text: "Neuken?\nNee!\n<b>OSS</b> speelt",
        preview: "Neuken? Nee! OSS speelt",
    },
    TileTemplate {
        id: 3,
        name: "Auto Tegel",
        text: "Neuken?\nNee!\nIk werk aan mijn\n<b>Dodge</b>",
        preview: "Neuken? Nee! Ik werk aan mijn Dodge",
    },
];

/// Returns the catalog of built in templates.
pub fn all() -> &'static [TileTemplate] {
    &TEMPLATES
}

/// Returns a template by its identifier.
pub fn get(id: u32) -> Option<&'static TileTemplate> {
    TEMPLATES.iter().find(|template| template.id == id)
}

/// Returns the template used to seed new projects.
pub fn default_template() -> &'static TileTemplate {
    &TEMPLATES[0]
}

#[cfg(test)]
mod tests {
    use crate::fonts::styles::StyleClass;
    use crate::layout::runs::{check_markup, segment_line};
    use crate::templates;

    #[test]
    fn templates_carry_clean_markup() {
        for template in templates::all() {
            assert!(check_markup(template.text).is_empty());
        }
    }

    #[test]
    fn football_template_lexes_as_expected() {
        let template = templates::get(2).unwrap();
        let lines: Vec<&str> = template.text.split('\n').collect();

        let runs = segment_line(lines[1]);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].class, StyleClass::Punctuation);

        let runs = segment_line(lines[2]);
        assert_eq!(runs[0].class, StyleClass::Bold);
        assert_eq!(runs[1].class, StyleClass::Regular);
    }

    #[test]
    fn unknown_template_id_returns_nothing() {
        assert!(templates::get(12).is_none());
    }
}

//! Font descriptor for keycap text rendering.

/// Font configuration for keycap labels.
///
/// Describes which font to use, including family name and weight. The
/// descriptor is passed through the rendering pipeline so keycap labels,
/// modifier names, and the repeat badge all agree on typography.
#[derive(Debug, Clone)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono").
    /// References installed system fonts by name.
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String) -> Self {
        Self { family, weight }
    }

    /// Converts this descriptor to a Pango font description string.
    ///
    /// Format: "Family Weight Size", e.g. "Sans Bold 22".
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "bold".to_string(),
        }
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pango_string_default() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(22.0), "Sans Bold 22");
    }

    #[test]
    fn pango_string_skips_normal_weight() {
        let font = FontDescriptor::new("Monospace".to_string(), "normal".to_string());
        assert_eq!(font.to_pango_string(16.0), "Monospace 16");
    }

    #[test]
    fn pango_string_rounds_size() {
        let font = FontDescriptor::new("Sans".to_string(), "light".to_string());
        assert_eq!(font.to_pango_string(17.6), "Sans Light 18");
    }
}

//! Color theme and its CSS custom properties.

use serde::{Deserialize, Serialize};

/// Application color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary: String,
    pub primary_dark: String,
    pub primary_light: String,
    pub secondary: String,
    pub secondary_dark: String,
    pub secondary_light: String,
    pub accent: String,
    pub danger: String,
    pub warning: String,
    pub success: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#ff7f00".into(),
            primary_dark: "#a05305ff".into(),
            primary_light: "#ee9236ff".into(),
            secondary: "#3B82F6".into(),
            secondary_dark: "#2563EB".into(),
            secondary_light: "#60A5FA".into(),
            accent: "#8B5CF6".into(),
            danger: "#EF4444".into(),
            warning: "#F59E0B".into(),
            success: "#10B981".into(),
        }
    }
}

/// Partial theme, e.g. from the `[theme]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOverrides {
    pub primary: Option<String>,
    pub primary_dark: Option<String>,
    pub primary_light: Option<String>,
    pub secondary: Option<String>,
    pub secondary_dark: Option<String>,
    pub secondary_light: Option<String>,
    pub accent: Option<String>,
    pub danger: Option<String>,
    pub warning: Option<String>,
    pub success: Option<String>,
}

impl Theme {
    /// Replace every color that `overrides` sets.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ThemeOverrides) -> Self {
        let slots = [
            (&mut self.primary, &overrides.primary),
            (&mut self.primary_dark, &overrides.primary_dark),
            (&mut self.primary_light, &overrides.primary_light),
            (&mut self.secondary, &overrides.secondary),
            (&mut self.secondary_dark, &overrides.secondary_dark),
            (&mut self.secondary_light, &overrides.secondary_light),
            (&mut self.accent, &overrides.accent),
            (&mut self.danger, &overrides.danger),
            (&mut self.warning, &overrides.warning),
            (&mut self.success, &overrides.success),
        ];
        for (slot, value) in slots {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        self
    }

    /// Colors keyed by their camelCase name, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("primary", self.primary.as_str()),
            ("primaryDark", self.primary_dark.as_str()),
            ("primaryLight", self.primary_light.as_str()),
            ("secondary", self.secondary.as_str()),
            ("secondaryDark", self.secondary_dark.as_str()),
            ("secondaryLight", self.secondary_light.as_str()),
            ("accent", self.accent.as_str()),
            ("danger", self.danger.as_str()),
            ("warning", self.warning.as_str()),
            ("success", self.success.as_str()),
        ]
    }

    /// `--theme-*` custom properties, e.g. `("--theme-primary-dark", "#a05305ff")`.
    pub fn css_variables(&self) -> Vec<(String, String)> {
        self.entries()
            .into_iter()
            .map(|(key, value)| (format!("--theme-{}", kebab_case(key)), value.to_string()))
            .collect()
    }

    /// Component-library primary palette, shades 50 to 950.
    pub fn primary_palette(&self) -> Vec<(String, String)> {
        [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]
            .into_iter()
            .map(|shade| {
                let color = match shade {
                    0..=400 => &self.primary_light,
                    500 | 600 => &self.primary,
                    _ => &self.primary_dark,
                };
                (format!("--p-primary-{shade}"), color.clone())
            })
            .collect()
    }

    /// A `:root` stylesheet block declaring all theme and palette variables.
    pub fn root_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.css_variables().into_iter().chain(self.primary_palette()) {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }
}

/// `primaryDark` -> `primary-dark`.
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

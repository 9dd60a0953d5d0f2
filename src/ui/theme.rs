// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Color theme applied to every rendered page.

/// Palette exposed to templates as CSS custom properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub body_background: &'static str,
    pub body_text: &'static str,
    pub primary: &'static str,
    pub primary_hovered: &'static str,
    pub primary_text: &'static str,
    pub neutral_lighter: &'static str,
    pub neutral_secondary: &'static str,
    pub disabled_background: &'static str,
    pub disabled_text: &'static str,
    pub error_background: &'static str,
    pub error_text: &'static str,
    pub success_background: &'static str,
    pub success_text: &'static str,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            body_background: "#1b1a19",
            body_text: "#f3f2f1",
            primary: "#fc4c02",
            primary_hovered: "#ff6a2b",
            primary_text: "#ffffff",
            neutral_lighter: "#252423",
            neutral_secondary: "#a19f9d",
            disabled_background: "#323130",
            disabled_text: "#797775",
            error_background: "#442726",
            error_text: "#f1bbbc",
            success_background: "#393d1b",
            success_text: "#dff6dd",
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            body_background: "#ffffff",
            body_text: "#323130",
            primary: "#fc4c02",
            primary_hovered: "#e04402",
            primary_text: "#ffffff",
            neutral_lighter: "#f3f2f1",
            neutral_secondary: "#605e5c",
            disabled_background: "#f3f2f1",
            disabled_text: "#a19f9d",
            error_background: "#fde7e9",
            error_text: "#a4262c",
            success_background: "#dff6dd",
            success_text: "#107c10",
        }
    }

    /// Look up a theme by name, falling back to dark.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// `:root { --name: value; ... }` block for the page `<style>`.
    pub fn css_variables(&self) -> String {
        let vars = [
            ("body-background", self.body_background),
            ("body-text", self.body_text),
            ("primary", self.primary),
            ("primary-hovered", self.primary_hovered),
            ("primary-text", self.primary_text),
            ("neutral-lighter", self.neutral_lighter),
            ("neutral-secondary", self.neutral_secondary),
            ("disabled-background", self.disabled_background),
            ("disabled-text", self.disabled_text),
            ("error-background", self.error_background),
            ("error-text", self.error_text),
            ("success-background", self.success_background),
            ("success-text", self.success_text),
        ];

        let mut css = String::from(":root {\n");
        for (name, value) in vars {
            css.push_str(&format!("  --{name}: {value};\n"));
        }
        css.push('}');
        css
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

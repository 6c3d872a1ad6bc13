use crate::wheel::ButtonVisual;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub foreground: Srgba<f64>,
    pub accent: Srgba<f64>,
    pub outline: Srgba<f64>,
    pub hub: (Srgba<f64>, Srgba<f64>),
    pub hub_near: (Srgba<f64>, Srgba<f64>),
    pub skeleton: Srgba<f64>,
    pub cursor: Srgba<f64>,
    pub cursor_pinched: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.08, 0.08, 0.1, 1.0),
                Some(1.0),
            ),
            foreground: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            accent: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.0, 1.0, 0.0, 0.3),
                Some(0.3),
            ),
            outline: Srgba::new(0.2, 0.2, 0.2, 1.0),
            hub: (Srgba::new(1.0, 1.0, 1.0, 1.0), Srgba::new(0.47, 0.47, 0.47, 1.0)),
            hub_near: (Srgba::new(0.67, 1.0, 0.67, 1.0), Srgba::new(0.0, 0.33, 0.0, 1.0)),
            skeleton: Srgba::new(0.0, 1.0, 0.62, 0.4),
            cursor: Srgba::new(1.0, 1.0, 1.0, 0.5),
            cursor_pinched: Srgba::new(0.0, 1.0, 0.0, 1.0),
        }
    }

    /// Top and bottom of the button gradient.
    pub fn button(&self, visual: ButtonVisual) -> (Srgba<f64>, Srgba<f64>) {
        let (top, bottom) = match visual {
            ButtonVisual::Spinning => ((0.4, 0.4, 0.4), (0.2, 0.2, 0.2)),
            ButtonVisual::Pressed => ((0.0, 0.27, 0.0), (0.0, 0.13, 0.0)),
            ButtonVisual::Hovered => ((0.33, 1.0, 0.33), (0.0, 0.67, 0.0)),
            ButtonVisual::Idle => ((0.0, 0.78, 0.0), (0.0, 0.39, 0.0)),
        };
        let opaque = |(r, g, b): (f64, f64, f64)| Srgba::new(r, g, b, 1.0);
        (opaque(top), opaque(bottom))
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.spinwheel-status {
    font-size: 20px;
    font-weight: bold;
    padding: 16px 24px;
    border-radius: 12px;
    background-color: rgba(0, 0, 0, 0.7);
    color: white;
}
.spinwheel-status.error {
    color: #ff4444;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

//! Badge rendering.
//!
//! A badge is a shields.io image wrapped in a link to the trigger endpoint:
//!
//! ```text
//! [![▶ Run](https://img.shields.io/badge/%E2%96%B6_Run-4caf50?style=flat-square)](https://app/workflow/trigger?...)
//! ```
//!
//! Badges come in two flavours that must stay separate: a *direct* badge
//! runs the workflow immediately, a *UI* badge (⚙️) opens a form to review
//! inputs first. [`BadgeRenderer::render_badge_pair`] always emits both.

use serde::{Deserialize, Serialize};

use super::context::RenderContext;
use super::params::Params;
use super::placeholder::resolve_params;
use super::trigger::{LinkStyle, TriggerTarget, build_trigger_url};

pub const SHIELDS_BADGE_BASE: &str = "https://img.shields.io/badge";

pub const DEFAULT_DIRECT_COLOR: &str = "4caf50";
pub const DEFAULT_UI_COLOR: &str = "ff9800";
pub const DEFAULT_ACCENT_COLOR: &str = "2196f3";
pub const DEFAULT_CUSTOM_COLOR: &str = "9c27b0";

pub const DEFAULT_STYLE: &str = "flat-square";
pub const DEFAULT_ICON: &str = "▶";
pub const UI_ICON: &str = "⚙️";

/// Named color tokens. Colors are bare hex-like strings passed straight to
/// the image service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Direct (run now) badges
    #[serde(default = "default_direct")]
    pub direct: String,
    /// UI (review first) badges
    #[serde(default = "default_ui")]
    pub ui: String,
    /// Highlighted rows
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Custom-input badges
    #[serde(default = "default_custom")]
    pub custom: String,
}

fn default_direct() -> String {
    DEFAULT_DIRECT_COLOR.to_string()
}

fn default_ui() -> String {
    DEFAULT_UI_COLOR.to_string()
}

fn default_accent() -> String {
    DEFAULT_ACCENT_COLOR.to_string()
}

fn default_custom() -> String {
    DEFAULT_CUSTOM_COLOR.to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            direct: default_direct(),
            ui: default_ui(),
            accent: default_accent(),
            custom: default_custom(),
        }
    }
}

/// One renderable badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeSpec {
    pub text: String,
    pub target: TriggerTarget,
    pub icon: Option<String>,
    pub color: String,
    pub style: String,
}

impl BadgeSpec {
    pub fn new(text: impl Into<String>, target: TriggerTarget) -> Self {
        Self {
            text: text.into(),
            target,
            icon: None,
            color: DEFAULT_ACCENT_COLOR.to_string(),
            style: DEFAULT_STYLE.to_string(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Text shown on the badge: `"<icon> <text>"` when an icon is set.
    pub fn badge_text(&self) -> String {
        match self.icon.as_deref().filter(|i| !i.is_empty()) {
            Some(icon) => format!("{} {}", icon, self.text).trim().to_string(),
            None => self.text.clone(),
        }
    }

    /// shields.io image URL for this badge.
    pub fn image_url(&self) -> String {
        shields_url(&self.badge_text(), &self.color, &self.style)
    }
}

/// Build a shields.io static badge URL.
///
/// Spaces become underscores, then the label is percent-encoded with `/`
/// left intact. The color is not validated.
pub fn shields_url(label: &str, color: &str, style: &str) -> String {
    let underscored = label.replace(' ', "_");
    let encoded = underscored
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}-{}?style={}", SHIELDS_BADGE_BASE, encoded, color, style)
}

/// Render a single badge as a markdown image link.
///
/// The badge text is not escaped; labels containing `]` or `(` must be
/// sanitized by the caller.
pub fn render_badge(ctx: &RenderContext, spec: &BadgeSpec) -> String {
    let url = build_trigger_url(ctx, &spec.target);
    format!("[![{}]({})]({})", spec.badge_text(), spec.image_url(), url)
}

/// Options for [`BadgeRenderer::badge`].
#[derive(Debug, Clone, Default)]
pub struct BadgeOptions {
    /// Ref to run on; defaults to the base branch.
    pub git_ref: Option<String>,
    /// Workflow inputs; placeholders are resolved before rendering.
    pub inputs: Params,
    /// Direct badge color; defaults to the palette's direct color.
    pub color: Option<String>,
    /// UI badge color; defaults to the palette's UI color.
    pub ui_color: Option<String>,
    /// Icon for the direct badge; defaults to the renderer icon. An empty
    /// string disables the icon.
    pub icon: Option<String>,
    /// Render only the UI badge, using `color` and `icon`.
    pub only_ui: bool,
}

/// Renders badges and badge pairs against one context.
///
/// Immutable after construction, so one renderer can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct BadgeRenderer {
    ctx: RenderContext,
    palette: Palette,
    style: String,
    icon: String,
}

impl BadgeRenderer {
    pub fn new(ctx: RenderContext) -> Self {
        Self {
            ctx,
            palette: Palette::default(),
            style: DEFAULT_STYLE.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn trigger_url(&self, target: &TriggerTarget) -> String {
        build_trigger_url(&self.ctx, target)
    }

    pub fn render_badge(&self, spec: &BadgeSpec) -> String {
        render_badge(&self.ctx, spec)
    }

    /// Render `spec` as a direct badge followed by its ⚙️ UI twin.
    ///
    /// Both badges share workflow, ref, inputs and extra overrides. The UI
    /// badge drops the caller's text and icon and uses `ui_color`.
    pub fn render_badge_pair(&self, spec: &BadgeSpec, ui_color: &str) -> String {
        let mut direct = spec.clone();
        direct.target.link_style = LinkStyle::Direct;

        let ui = BadgeSpec {
            text: UI_ICON.to_string(),
            target: TriggerTarget {
                link_style: LinkStyle::Ui,
                ..spec.target.clone()
            },
            icon: None,
            color: ui_color.to_string(),
            style: spec.style.clone(),
        };

        format!("{} {}", self.render_badge(&direct), self.render_badge(&ui))
    }

    /// Render a badge pair (or a lone UI badge) with placeholder resolution.
    pub fn badge(&self, text: &str, workflow_id: &str, opts: &BadgeOptions) -> String {
        let inputs = resolve_params(&opts.inputs, &self.ctx);
        let git_ref = opts
            .git_ref
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.ctx.base_branch().to_string());
        let icon = opts.icon.clone().unwrap_or_else(|| self.icon.clone());
        let color = opts
            .color
            .clone()
            .unwrap_or_else(|| self.palette.direct.clone());

        let mut target = TriggerTarget::new(workflow_id)
            .git_ref(git_ref)
            .params(inputs);

        if opts.only_ui {
            target.link_style = LinkStyle::Ui;
            let spec = BadgeSpec::new(text, target)
                .icon(icon)
                .color(color)
                .style(self.style.clone());
            return self.render_badge(&spec);
        }

        let ui_color = opts
            .ui_color
            .clone()
            .unwrap_or_else(|| self.palette.ui.clone());
        let spec = BadgeSpec::new(text, target)
            .icon(icon)
            .color(color)
            .style(self.style.clone());
        self.render_badge_pair(&spec, &ui_color)
    }
}

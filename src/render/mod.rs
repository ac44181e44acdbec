//! Badge, trigger-URL and table rendering.
//!
//! Everything in this module is a pure function of its inputs: no I/O, no
//! shared mutable state, byte-identical output for identical input.
//!
//! | Module        | Responsibility                                   |
//! |---------------|--------------------------------------------------|
//! | `context`     | `RenderContext` and the vars file it comes from  |
//! | `params`      | ordered input maps and query encoding            |
//! | `placeholder` | `{pr_number}`-style token resolution             |
//! | `trigger`     | trigger endpoint URLs                            |
//! | `badge`       | single badges, badge pairs, palettes             |
//! | `table`       | markdown tables of badge pairs                   |

pub mod badge;
pub mod context;
pub mod params;
pub mod placeholder;
pub mod table;
pub mod trigger;

pub use badge::{BadgeOptions, BadgeRenderer, BadgeSpec, Palette, render_badge, shields_url};
pub use context::{RenderContext, Vars};
pub use params::{Params, params};
pub use placeholder::{PlaceholderToken, resolve_params, resolve_placeholders};
pub use table::{DEFAULT_COLUMNS, TableOptions, TableRow, render_table, strip_markdown};
pub use trigger::{LinkStyle, TriggerTarget, build_trigger_url};

//! Configuration section definitions.
//!
//! Each module corresponds to a part of the site document:
//!
//! | Module     | Keys                                      | Purpose                  |
//! |------------|-------------------------------------------|--------------------------|
//! | `build`    | `target`, `buildModules`, `modules`       | Render target, modules   |
//! | `head`     | `[head]`, `[head.htmlAttrs]`              | Page metadata            |
//! | `content`  | `[content]`, `[content.markdown.prism]`   | Content module options   |
//! | `tailwind` | `[tailwindcss]`                           | CSS compiler integration |

pub mod build;
pub mod content;
pub mod head;
pub mod tailwind;

pub use build::{RenderTarget, validate_module_list};
pub use content::{ContentConfig, MarkdownConfig, PrismConfig};
pub use head::{HeadConfig, HtmlAttrsConfig, LinkTag, MetaTag};
pub use tailwind::TailwindConfig;

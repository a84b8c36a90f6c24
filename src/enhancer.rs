//! Page enhancement pass.
//!
//! A rendered releases page is streamed through an HTML rewriter once,
//! applying four order-independent sub-passes:
//!
//! * absolute pass - elements carrying the absolute-datetime class have
//!   their text normalized to the fixed display pattern;
//! * relative pass - elements carrying the relative-datetime class have
//!   their text replaced by a humanized offset from the reference instant;
//! * cache-expiry pass - the designated cache-expiry element gets the same
//!   relative treatment;
//! * table pass - the releases table receives the widget configuration.
//!
//! All relative computations share a single reference instant, captured once
//! per invocation, so that every element on the page agrees on the same
//! "now". Elements are processed independently: text that fails to parse is
//! rendered as the invalid-date marker and never interrupts the pass, and a
//! selector matching nothing is a guaranteed no-op.

use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use lol_html::errors::RewritingError;
use lol_html::html_content::{ContentType, Element, TextChunk};
use lol_html::{rewrite_str, ElementContentHandlers, HandlerResult, RewriteStrSettings, Selector};

use crate::config::Config;
use crate::utils::datetime;
use crate::widget::{TableConfig, WidgetError};

/// Errors surfaced while constructing or running an enhancement pass.
///
/// A timestamp that fails to parse is not an error: it is rendered as the
/// invalid-date marker and the pass continues.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("failed to rewrite document: {0}")]
    Rewrite(String),
}

/// Number of elements touched by each sub-pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnhanceSummary {
    pub absolute: usize,
    pub relative: usize,
    pub cache_expiry: usize,
    pub tables: usize,
}

/// An enhanced document together with its pass summary.
#[derive(Clone, Debug)]
pub struct EnhancedPage {
    pub html: String,
    pub summary: EnhanceSummary,
}

/// Selectors compiled once at construction
struct Selectors {
    absolute: Selector,
    relative: Selector,
    cache_expiry: Selector,
    table: Selector,
    header_cells: Selector,
}

/// The page enhancer.
///
/// Holds the compiled selectors and the widget configuration; one instance
/// can enhance any number of documents.
pub struct Enhancer {
    selectors: Selectors,
    table: TableConfig,
    datetime_format: String,
}

impl Enhancer {
    /// Build an enhancer from a configuration, compiling its selectors.
    pub fn new(config: Config) -> Result<Self, EnhanceError> {
        let selectors = Selectors {
            absolute: compile(&format!(".{}", config.selectors.absolute_class))?,
            relative: compile(&format!(".{}", config.selectors.relative_class))?,
            cache_expiry: compile(&format!("#{}", config.selectors.cache_expiry_id))?,
            // Bound to table elements only: the widget cannot attach to
            // anything else carrying the id
            table: compile(&format!("table#{}", config.selectors.table_id))?,
            header_cells: compile(&format!("table#{} thead th", config.selectors.table_id))?,
        };

        Ok(Self {
            selectors,
            table: config.table,
            datetime_format: config.display.datetime_format,
        })
    }

    /// Enhance a document, capturing the reference instant once.
    pub fn enhance(&self, html: &str) -> Result<EnhancedPage, EnhanceError> {
        self.enhance_at(html, Utc::now())
    }

    /// Enhance a document against an explicit reference instant.
    ///
    /// All relative-duration elements are computed against the same `now`,
    /// so two elements carrying the same timestamp always render the same
    /// phrase regardless of how long the pass itself takes.
    pub fn enhance_at(&self, html: &str, now: DateTime<Utc>) -> Result<EnhancedPage, EnhanceError> {
        let absolute_seen = Rc::new(Cell::new(0usize));
        let relative_seen = Rc::new(Cell::new(0usize));
        let cache_seen = Rc::new(Cell::new(0usize));
        let tables_seen = Rc::new(Cell::new(0usize));
        let header_cells = Rc::new(Cell::new(0usize));

        let datetime_format = self.datetime_format.clone();
        let table = self.table;

        let handlers = vec![
            (
                Cow::Borrowed(&self.selectors.absolute),
                ElementContentHandlers::default().text(text_rewriter(
                    Rc::clone(&absolute_seen),
                    move |raw| datetime::format_absolute_with(raw, &datetime_format),
                )),
            ),
            (
                Cow::Borrowed(&self.selectors.relative),
                ElementContentHandlers::default().text(text_rewriter(
                    Rc::clone(&relative_seen),
                    move |raw| datetime::humanize_relative(raw, now),
                )),
            ),
            (
                Cow::Borrowed(&self.selectors.cache_expiry),
                ElementContentHandlers::default().text(text_rewriter(
                    Rc::clone(&cache_seen),
                    move |raw| datetime::humanize_relative(raw, now),
                )),
            ),
            (
                Cow::Borrowed(&self.selectors.table),
                ElementContentHandlers::default().element({
                    let tables_seen = Rc::clone(&tables_seen);
                    move |element: &mut Element| -> HandlerResult {
                        table.apply(element)?;
                        tables_seen.set(tables_seen.get() + 1);
                        Ok(())
                    }
                }),
            ),
            (
                Cow::Borrowed(&self.selectors.header_cells),
                ElementContentHandlers::default().element({
                    let header_cells = Rc::clone(&header_cells);
                    move |_element: &mut Element| -> HandlerResult {
                        header_cells.set(header_cells.get() + 1);
                        Ok(())
                    }
                }),
            ),
        ];

        let html = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: handlers,
                ..RewriteStrSettings::default()
            },
        )
        .map_err(map_rewriting_error)?;

        // The widget's own failure mode: an initial sort column the table
        // does not have
        if tables_seen.get() > 0 {
            self.table.validate_columns(header_cells.get())?;
        }

        let summary = EnhanceSummary {
            absolute: absolute_seen.get(),
            relative: relative_seen.get(),
            cache_expiry: cache_seen.get(),
            tables: tables_seen.get(),
        };
        log::debug!(
            "enhanced page: {} absolute, {} relative, {} cache expiry, {} table(s)",
            summary.absolute,
            summary.relative,
            summary.cache_expiry,
            summary.tables
        );

        Ok(EnhancedPage { html, summary })
    }
}

fn compile(selector: &str) -> Result<Selector, EnhanceError> {
    selector.parse::<Selector>().map_err(|e| EnhanceError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Build a text handler replacing each text node of the matched elements.
///
/// Chunks of one text node are buffered until the rewriter flags the last
/// one, then the whole trimmed text is passed through `render` and written
/// back in place.
fn text_rewriter<F>(
    counter: Rc<Cell<usize>>,
    render: F,
) -> impl FnMut(&mut TextChunk) -> HandlerResult
where
    F: Fn(&str) -> String,
{
    let mut buffer = String::new();
    move |chunk| {
        buffer.push_str(chunk.as_str());
        if chunk.last_in_text_node() {
            if !buffer.is_empty() {
                chunk.replace(&render(buffer.trim()), ContentType::Text);
                counter.set(counter.get() + 1);
            }
            buffer.clear();
        } else {
            chunk.remove();
        }
        Ok(())
    }
}

fn map_rewriting_error(error: RewritingError) -> EnhanceError {
    match error {
        RewritingError::ContentHandlerError(inner) => match inner.downcast::<WidgetError>() {
            Ok(widget) => EnhanceError::Widget(*widget),
            Err(other) => EnhanceError::Rewrite(other.to_string()),
        },
        other => EnhanceError::Rewrite(other.to_string()),
    }
}

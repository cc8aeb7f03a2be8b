//! Draws viewable objects into a terminal window.

use crate::clock::Clock;
use crate::count::Month;
use crate::mastodon::client::Activity;
use crate::mastodon::status::Account;
use indoc::formatdoc;

const RULE: &str = "═══════════════════════════════════";

const POSTS_PER_GLYPH: usize = 2;
const BAR_CAP: usize = 50;

/// View renderer options.
#[derive(Debug, Default)]
pub struct ViewOptions {
    current_only: bool,
}

impl ViewOptions {
    /// Incrementally builds a new set of view options.
    ///
    /// # Examples
    ///
    /// ```
    /// use utootwhen::view::ViewOptions;
    /// let opts = ViewOptions::build().current_only(true).build();
    /// ```
    pub fn build() -> ViewOptionsBuilder {
        ViewOptionsBuilder::default()
    }
}

/// A builder for view options.
///
/// You probably don't want to use this directly; call [`ViewOptions::build()`]
/// and construct it incrementally instead.
#[derive(Debug, Default)]
#[must_use]
pub struct ViewOptionsBuilder {
    current_only: bool,
}

impl ViewOptionsBuilder {
    /// Sets the "current month only" option to true or false.
    pub fn current_only(mut self, current_only: bool) -> Self {
        self.current_only = current_only;
        self
    }

    /// Finalizes the [`ViewOptions`].
    pub fn build(self) -> ViewOptions {
        ViewOptions {
            current_only: self.current_only,
        }
    }
}

/// Marks an item that can be converted into a string for display on a terminal.
pub trait Viewable {
    /// Converts the item into a string for display on a terminal.
    fn view(&self, opts: &ViewOptions, clock: &impl Clock) -> String;
}

impl Viewable for Account {
    fn view(&self, _: &ViewOptions, _: &impl Clock) -> String {
        formatdoc! {"
            User: @{}
            Created: {}
            Posts on record: {}",
            self.acct(),
            self.created_at().format("%b %d, %Y"),
            self.statuses_count(),
        }
    }
}

impl Viewable for Activity {
    fn view(&self, opts: &ViewOptions, clock: &impl Clock) -> String {
        let current = Month::current(clock);

        if opts.current_only {
            let count = self.months().count_for(&current);
            formatdoc! {"
                {RULE}
                  Current month ({current})
                {RULE}
                  Posts: {count}
                {RULE}"
            }
        } else {
            let mut lines = vec![
                String::from(RULE),
                String::from("  Posts per month"),
                String::from(RULE),
            ];
            for (month, count) in self.months().sorted() {
                let mut line = format!("  {month}: {count:4}");
                let bar = bar(count);
                if !bar.is_empty() {
                    line.push(' ');
                    line.push_str(&bar);
                }
                if month == current {
                    line.push_str(" ← current month");
                }
                lines.push(line);
            }
            lines.push(String::from(RULE));
            lines.push(format!("  Total: {} posts", self.total()));
            lines.push(String::from(RULE));
            lines.join("\n")
        }
    }
}

fn bar(count: usize) -> String {
    "█".repeat((count / POSTS_PER_GLYPH).min(BAR_CAP))
}

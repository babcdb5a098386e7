//! Fuzzy habit picker using skim.

use std::sync::Arc;

use skim::prelude::*;

use crate::habits::Habit;

/// A habit row shown in the picker; outputs its index.
struct HabitItem {
    display: String,
    key: String,
}

impl HabitItem {
    fn new(index: usize, habit: &Habit) -> Self {
        Self {
            display: habit.to_string(),
            key: index.to_string(),
        }
    }
}

impl SkimItem for HabitItem {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }

    fn output(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.key)
    }
}

/// Run the picker over `habits` and return the chosen index.
///
/// Returns `None` if the list is empty or the user aborts.
pub fn pick_habit(habits: &[Habit]) -> Option<usize> {
    if habits.is_empty() {
        return None;
    }

    let options = SkimOptionsBuilder::default()
        .height(Some("40%"))
        .multi(false)
        .prompt(Some("Select habit > "))
        .header(Some("Enter: select | Esc/Ctrl-C: cancel"))
        .build()
        .ok()?;

    let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
    for (index, habit) in habits.iter().enumerate() {
        let item: Arc<dyn SkimItem> = Arc::new(HabitItem::new(index, habit));
        let _ = tx.send(item);
    }
    drop(tx);

    let output = Skim::run_with(&options, Some(rx))?;
    if output.is_abort {
        return None;
    }

    output
        .selected_items
        .first()
        .and_then(|item| item.output().parse::<usize>().ok())
        .filter(|index| *index < habits.len())
}

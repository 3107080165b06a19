use remindme_models::{
    day_key::DayKey,
    note::Note,
    task::{Progress, Task},
};

pub(crate) const HELP_TEXT: &str = "✅ Commands:
• /add <task>   Add a task for today
• /today        View today's tasks
• /checkin      Start final check-in now
• /del <id>     Delete a task by id
• /reset        Delete all tasks for today
• /note <text>  Save a short note (your own feedback)
• /help         Show help
";

pub(crate) const WELCOME_HTML: &str = "✨ <b>Welcome to RemindMe Bot</b> 😊

I help you plan your day and do a quick nightly check-in.

🧩 <b>How to use:</b>
1) Add tasks:  <code>/add &lt;task&gt;</code>
2) View tasks: <code>/today</code>
3) Night check-in: <code>/checkin</code> (or wait for 11:50 PM)

⏰ <b>Daily reminders (Asia/Dhaka):</b>
• 6:00 PM: task reminder
• 11:50 PM: final check-in (tap buttons + Finalize)

🚀 <b>Quick start:</b>
• <code>/add Study 1 hour</code>
• <code>/add Gym</code>
• <code>/today</code>

Type <b>/help</b> to see the full command list.";

pub(crate) const TEXT_ONLY_NOTICE: &str = "⚠️ I'm a text-based bot.
I can't read photos, videos, files, or voice notes.

Please use commands like:
• /add <task>
• /today
• /checkin
• /help";

pub(crate) const UNKNOWN_COMMAND: &str =
    "I didn't recognize that command.\n\nType /help to see commands.";

pub(crate) const FAILURE_NOTICE: &str =
    "⚠️ Something went wrong while saving your data. Please try again later.";

const HELP_FOOTER: &str = "\n\nType /help to see commands.";

pub(crate) fn with_footer(text: impl Into<String>) -> String {
    let mut text = text.into();
    text.push_str(HELP_FOOTER);
    text
}

pub(crate) fn task_line(task: &Task) -> String {
    let mark = if task.done { "[x]" } else { "[ ]" };
    format!("{}. {} {}", task.id, task.text, mark)
}

fn task_lines(tasks: &[Task]) -> String {
    tasks.iter().map(task_line).collect::<Vec<_>>().join("\n")
}

pub(crate) fn today(tasks: &[Task], note: Option<&Note>, day_key: &DayKey) -> String {
    if tasks.is_empty() {
        return with_footer(format!(
            "Today ({day_key}) you have no tasks. Use /add <task>."
        ));
    }

    let mut text = format!("🗓️ {day_key}: Your Tasks\n{}", task_lines(tasks));
    match note {
        Some(note) => text.push_str(&format!("\n\n📝 Your note: {}", note.text)),
        None => text.push_str("\n\nTip: add a note with /note <text>"),
    }

    with_footer(text)
}

pub(crate) fn evening_reminder(tasks: &[Task], day_key: &DayKey) -> String {
    if tasks.is_empty() {
        format!(
            "⏰ 6:00 PM Reminder ({day_key})\nYou have not added any tasks today.\nUse /add <task> to add tasks."
        )
    } else {
        format!(
            "⏰ 6:00 PM Reminder ({day_key})\nHere are your tasks:\n{}",
            task_lines(tasks)
        )
    }
}

pub(crate) fn feedback(progress: Progress) -> &'static str {
    if progress.total == 0 {
        return "No tasks were set today. Tomorrow, start with 1-2 small tasks 😊";
    }
    if progress.done == progress.total {
        return "🔥 Amazing! You completed everything. Keep it up ✅";
    }

    let ratio = progress.ratio();
    if ratio >= 0.7 {
        "👏 Great job! You were very close. Tomorrow you'll crush it ✅"
    } else if ratio > 0.0 {
        "👍 Good effort. Try smaller tasks to build momentum 😊"
    } else {
        "💛 It's okay. Tomorrow: start with one tiny task first, then build from there."
    }
}

pub(crate) fn final_result(progress: Progress, note: Option<&Note>, day_key: &DayKey) -> String {
    let mut text = format!(
        "✅ Final result for {day_key}: {}/{}\n{}",
        progress.done,
        progress.total,
        feedback(progress)
    );
    if let Some(note) = note {
        text.push_str(&format!("\n\n📝 Your note: {}", note.text));
    }

    with_footer(text)
}

//! Terminal notice sink.

use colored::Colorize;
use w3w::{Notice, NoticeLevel, Notifier};

/// Prints notices to stderr, one line each, tagged and coloured by level.
///
/// stdout stays reserved for the result envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
	fn notify(&self, notice: Notice) {
		eprintln!("{}", render(&notice));
	}
}

fn render(notice: &Notice) -> String {
	let tag = match notice.level {
		NoticeLevel::Success => "success".green().bold(),
		NoticeLevel::Error => "error".red().bold(),
		NoticeLevel::Info => "info".cyan().bold(),
	};
	format!("{tag}: {}", notice.message)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_tags_level() {
		colored::control::set_override(false);
		assert_eq!(
			render(&Notice::success("Wallet connected successfully!")),
			"success: Wallet connected successfully!"
		);
		assert_eq!(render(&Notice::info("Wallet disconnected")), "info: Wallet disconnected");
	}
}

//! Option help text.

use crate::spec::{OptionInfo, Options, option_infos};

/// Formats help text for `T`'s options.
///
/// See [`format_option_help`].
#[must_use]
pub fn option_help<T: Options>() -> String {
    format_option_help(&option_infos::<T>())
}

/// Formats help text for a list of options.
///
/// One line per option, in order: `    --<name> <type>` (with a trailing
/// `...` for accumulating options), padded to a common column, then the
/// description. Returns an empty string when `options` is empty.
///
/// ```
/// use rigging_options::{OptionInfo, format_option_help};
///
/// let help = format_option_help(&[
///     OptionInfo { name: "log-level", description: "Minimum level.", type_label: "string", collection: false },
///     OptionInfo { name: "tag", description: "Extra tag.", type_label: "string", collection: true },
/// ]);
///
/// assert_eq!(
///     help,
///     "    --log-level string  Minimum level.\n    --tag string...     Extra tag.\n"
/// );
/// ```
#[must_use]
pub fn format_option_help(options: &[OptionInfo]) -> String {
    let heads: Vec<String> = options
        .iter()
        .map(|info| {
            let suffix = if info.collection { "..." } else { "" };
            format!("    --{} {}{suffix}", info.name, info.type_label)
        })
        .collect();
    // `{:<width$}` pads by characters, not bytes.
    let width = heads
        .iter()
        .map(|head| head.chars().count())
        .max()
        .unwrap_or(0);

    let mut help = String::new();
    for (head, info) in heads.iter().zip(options) {
        if info.description.is_empty() {
            help.push_str(head);
        } else {
            help.push_str(&format!("{head:<width$}  {}", info.description));
        }
        help.push('\n');
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &'static str, description: &'static str) -> OptionInfo {
        OptionInfo {
            name,
            description,
            type_label: "integer",
            collection: false,
        }
    }

    #[test]
    fn no_options_yield_empty_help() {
        assert_eq!(format_option_help(&[]), "");
    }

    #[test]
    fn descriptions_align_on_longest_head() {
        let help = format_option_help(&[info("port", "Port."), info("max-connections", "Cap.")]);
        let lines: Vec<&str> = help.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].find("Port."), lines[1].find("Cap."));
    }

    #[test]
    fn non_ascii_names_align_by_character() {
        let help = format_option_help(&[info("größe", "Size."), info("width", "Width.")]);
        let lines: Vec<&str> = help.lines().collect();

        assert_eq!(lines[0], "    --größe integer  Size.");
        assert_eq!(lines[1], "    --width integer  Width.");
    }

    #[test]
    fn missing_description_has_no_trailing_padding() {
        let help = format_option_help(&[info("port", ""), info("max-connections", "Cap.")]);
        assert_eq!(help.lines().next(), Some("    --port integer"));
    }
}

//! Small string helpers shared by the accessors.


/// Characters that separate the parts of a list element, e.g. `SPEED~100~2`.
pub const LIST_DELIMITERS: [char; 3] = ['~', '-', ' '];

/// Splits a list element into its parts.
///
/// Runs of delimiters count as one separator. A `-` directly followed by a
/// non-delimiter starts a negative number, so `5~-3` and `5--3` both split into
/// `["5", "-3"]`, while `5 - 3` splits into `["5", "3"]`.
pub fn split(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for character in input.trim().chars() {
        if !LIST_DELIMITERS.contains(&character) {
            current.push(character);
            continue;
        }

        // A lone `-` before another delimiter was a separator, not a sign.
        if current == "-" {
            current.clear();
        }

        if current.is_empty() {
            if character == '-' {
                current.push('-');
            }
            continue;
        }

        parts.push(std::mem::take(&mut current));
    }

    if !current.is_empty() && current != "-" {
        parts.push(current);
    }

    parts
}


/// Legacy `&` formatting codes and the tags they become.
const LEGACY_CODES: [(char, &str); 22] = [
    ('0', "black"),
    ('1', "dark_blue"),
    ('2', "dark_green"),
    ('3', "dark_aqua"),
    ('4', "dark_red"),
    ('5', "dark_purple"),
    ('6', "gold"),
    ('7', "gray"),
    ('8', "dark_gray"),
    ('9', "blue"),
    ('a', "green"),
    ('b', "aqua"),
    ('c', "red"),
    ('d', "light_purple"),
    ('e', "yellow"),
    ('f', "white"),
    ('k', "obfuscated"),
    ('l', "bold"),
    ('m', "strikethrough"),
    ('n', "underlined"),
    ('o', "italic"),
    ('r', "reset"),
];

fn legacy_tag(code: char) -> Option<&'static str> {
    let code = code.to_ascii_lowercase();
    LEGACY_CODES
        .iter()
        .find(|(legacy, _)| *legacy == code)
        .map(|(_, tag)| *tag)
}

/// Converts legacy colour codes (`&a`, `&l`, `&#ff8800`) into MiniMessage-style
/// tags (`<green>`, `<bold>`, `<#ff8800>`). Text that already uses tags is left alone.
pub fn color_adventure(input: &str) -> String {
    let characters: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());

    let mut index = 0;
    while index < characters.len() {
        let character = characters[index];

        if character == '&' && index + 1 < characters.len() {
            let code = characters[index + 1];

            if code == '#' && index + 8 <= characters.len() {
                let hex: String = characters[index + 2..index + 8].iter().collect();
                if hex.chars().all(|digit| digit.is_ascii_hexdigit()) {
                    output.push_str(&format!("<#{hex}>"));
                    index += 8;
                    continue;
                }
            }

            if let Some(tag) = legacy_tag(code) {
                output.push('<');
                output.push_str(tag);
                output.push('>');
                index += 2;
                continue;
            }
        }

        output.push(character);
        index += 1;
    }

    output
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_every_delimiter() {
        assert_eq!(split("SPEED~100~2"), ["SPEED", "100", "2"]);
        assert_eq!(split("SPEED-100-2"), ["SPEED", "100", "2"]);
        assert_eq!(split("SPEED 100  2"), ["SPEED", "100", "2"]);
    }

    #[test]
    fn split_keeps_negative_signs() {
        assert_eq!(split("5~-3"), ["5", "-3"]);
        assert_eq!(split("5--3"), ["5", "-3"]);
        assert_eq!(split("-5-3"), ["-5", "3"]);
    }

    #[test]
    fn spaced_dashes_are_separators() {
        assert_eq!(split("a - 1 - 1"), ["a", "1", "1"]);
        assert_eq!(split("a ~ -1"), ["a", "-1"]);
        assert_eq!(split("a -"), ["a"]);
    }

    #[test]
    fn split_of_blank_input_is_empty() {
        assert!(split("   ").is_empty());
    }

    #[test]
    fn legacy_colors_become_tags() {
        assert_eq!(color_adventure("&aReloading &lnow"), "<green>Reloading <bold>now");
        assert_eq!(color_adventure("&#FF8800Hot"), "<#FF8800>Hot");
        assert_eq!(color_adventure("<red>Already fine"), "<red>Already fine");
        assert_eq!(color_adventure("Fish & chips &"), "Fish & chips &");
    }
}

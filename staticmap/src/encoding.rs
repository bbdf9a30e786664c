use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in query parameter values.
///
/// Separators used inside the parameter values of the API (`:`, `,`, `/`) are kept as is, the
/// ones that would split the query string are escaped.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub(crate) fn escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// `name:value` pair used inside marker and path parameters.
pub(crate) fn style_pair(name: &str, value: &str) -> String {
    format!("{name}:{}", escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_api_separators() {
        assert_eq!(escape("59.5,10.25"), "59.5,10.25");
        assert_eq!(escape("http://www.icon.com/"), "http://www.icon.com/");
        assert_eq!(escape("0x110000ff"), "0x110000ff");
    }

    #[test]
    fn escapes_query_breaking_chars() {
        assert_eq!(
            escape("http://www.icon.com/foo bar/"),
            "http://www.icon.com/foo%20bar/"
        );
        assert_eq!(escape("a=1&b|c"), "a%3D1%26b%7Cc");
        assert_eq!(escape("Øvre Slottsgate"), "%C3%98vre%20Slottsgate");
    }
}

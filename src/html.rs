//! Small hand-rolled HTML scanning: tag stripping and `<img>` extraction.
//!
//! Neither needs a DOM. Stripping is purely lexical (any `<…>` run goes);
//! image extraction walks tags left to right, skipping comments and the
//! raw text of `script` and `style`.

use serde::Serialize;

/// Removes every `<`, one-or-more non-`>` characters, `>` run.
///
/// Text outside tags is returned as is: entities stay encoded and
/// whitespace is untouched. A `<` with no closing `>` after it is text.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let after = &rest[lt + 1..];
        match after.find('>') {
            Some(0) => {
                out.push('<');
                rest = after;
            }
            Some(gt) => rest = &after[gt + 1..],
            None => {
                out.push_str(&rest[lt..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Attributes of one `<img>` element, entity-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImgTag {
    pub src: String,
    pub alt: String,
    pub title: String,
}

/// Every `<img>` with a non-empty `src`, in document order.
pub fn find_images(html: &str) -> Vec<ImgTag> {
    let bytes = html.as_bytes();
    // ASCII lowercasing keeps byte offsets, so positions found in `lower`
    // index `html` too.
    let lower = html.to_ascii_lowercase();
    let mut images = Vec::new();
    let mut pos = 0;

    while let Some(off) = lower[pos..].find('<') {
        let lt = pos + off;

        if lower[lt..].starts_with("<!--") {
            match lower[lt + 4..].find("-->") {
                Some(end) => pos = lt + 4 + end + 3,
                None => break,
            }
            continue;
        }

        // `a < b` is text, not a tag.
        let starts_tag = bytes
            .get(lt + 1)
            .is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'));
        if !starts_tag {
            pos = lt + 1;
            continue;
        }

        let Some(gt) = tag_end(bytes, lt + 1) else { break };
        let tag = &html[lt + 1..gt];
        pos = gt + 1;

        let name = tag_name(&lower[lt + 1..gt]);
        match name {
            "img" => {
                if let Some(img) = img_from_attributes(attributes(tag)) {
                    images.push(img);
                }
            }
            "script" | "style" if !tag.ends_with('/') => {
                let close = format!("</{name}");
                match lower[pos..].find(&close) {
                    Some(end) => pos += end,
                    None => break,
                }
            }
            _ => {}
        }
    }

    images
}

fn img_from_attributes(attrs: Vec<(String, String)>) -> Option<ImgTag> {
    let mut src = None;
    let mut alt = None;
    let mut title = None;

    // Last occurrence of a duplicated attribute wins.
    for (name, value) in attrs {
        let slot = match name.as_str() {
            "src" => &mut src,
            "alt" => &mut alt,
            "title" => &mut title,
            _ => continue,
        };
        *slot = Some(value);
    }

    let src = src.filter(|s| !s.is_empty())?;
    Some(ImgTag {
        src,
        alt: alt.unwrap_or_default(),
        title: title.unwrap_or_default(),
    })
}

/// Index of the `>` closing the tag that starts before `from`. Quotes only
/// count right after `=`, so an apostrophe in an unquoted value is harmless.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    let mut after_eq = false;

    while i < bytes.len() {
        match bytes[i] {
            b'>' => return Some(i),
            b'=' => after_eq = true,
            q @ (b'"' | b'\'') if after_eq => {
                let close = bytes[i + 1..].iter().position(|&b| b == q)?;
                i += 1 + close;
                after_eq = false;
            }
            b if b.is_ascii_whitespace() => {}
            _ => after_eq = false,
        }
        i += 1;
    }
    None
}

fn tag_name(tag: &str) -> &str {
    tag.split(|c: char| c.is_ascii_whitespace() || c == '/')
        .next()
        .unwrap_or("")
}

/// Parses `name="v" name='v' name=v name` pairs after the element name.
/// Names come back lowercased, values entity-decoded.
fn attributes(tag: &str) -> Vec<(String, String)> {
    let bytes = tag.as_bytes();
    let len = bytes.len();
    let mut attrs = Vec::new();

    let mut i = bytes
        .iter()
        .position(|b| b.is_ascii_whitespace() || *b == b'/')
        .unwrap_or(len);

    loop {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= len {
            break;
        }

        let start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'/') {
            i += 1;
        }
        let name = tag[start..i].to_ascii_lowercase();

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = "";
        if i < len && bytes[i] == b'=' {
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                Some(&(q @ (b'"' | b'\''))) => {
                    let from = i + 1;
                    let to = tag[from..].find(q as char).map_or(len, |n| from + n);
                    value = &tag[from..to];
                    i = (to + 1).min(len);
                }
                Some(_) => {
                    let from = i;
                    while i < len && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    value = &tag[from..i];
                }
                None => {}
            }
        }

        if !name.is_empty() {
            attrs.push((name, decode_entities(value)));
        }
    }

    attrs
}

/// Decodes numeric character references, the markup entities and the
/// Latin-1 named set (`&nbsp;` through `&yuml;`) plus a few punctuation
/// names. Anything else is copied through verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| entity(&after[..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Named entities for U+00A0..=U+00FF, in code point order.
const LATIN1: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect",
    "uml", "copy", "ordf", "laquo", "not", "shy", "reg", "macr",
    "deg", "plusmn", "sup2", "sup3", "acute", "micro", "para", "middot",
    "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil",
    "Egrave", "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml",
    "ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times",
    "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig",
    "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml",
    "eth", "ntilde", "ograve", "oacute", "ocirc", "otilde", "ouml", "divide",
    "oslash", "ugrave", "uacute", "ucirc", "uuml", "yacute", "thorn", "yuml",
];

fn entity(name: &str) -> Option<char> {
    if let Some(i) = LATIN1.iter().position(|&n| n == name) {
        return char::from_u32(0xA0 + i as u32);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            return char::from_u32(code);
        }
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn strip_removes_tags_only() {
        assert_eq!(strip_tags("<p>Hello <b>World</b></p>"), "Hello World");
        assert_eq!(strip_tags("a &amp; b"), "a &amp; b");
        assert_eq!(strip_tags("<div>\n  line\n</div>"), "\n  line\n");
    }

    #[test]
    fn strip_edge_cases() {
        assert_eq!(strip_tags("1 < 2"), "1 < 2");
        assert_eq!(strip_tags("<>"), "<>");
        assert_eq!(strip_tags("x <<a>y"), "x y");
        assert_eq!(strip_tags("<<a>b>"), "b>");
        assert_eq!(strip_tags("<a href=\"x\">link</a> tail <"), "link tail <");
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn finds_images_with_attributes() {
        let html = r#"<html><body>
            <IMG SRC="/a.png" ALT="First &amp; best" title='T'>
            <img src=b.jpg>
            <img alt="no source">
            <img src="">
            <img data-src="lazy.png" src="real.png"/>
        </body></html>"#;

        let images = find_images(html);
        assert_eq!(
            images,
            vec![
                ImgTag { src: "/a.png".into(), alt: "First & best".into(), title: "T".into() },
                ImgTag { src: "b.jpg".into(), alt: String::new(), title: String::new() },
                ImgTag { src: "real.png".into(), alt: String::new(), title: String::new() },
            ]
        );
    }

    #[test]
    fn skips_comments_and_raw_text() {
        let html = r#"
            <!-- <img src="commented.png"> -->
            <script>document.write('<img src="scripted.png">')</script>
            <style>.x { background: url("<img src=styled.png>") }</style>
            <img src="kept.png">
        "#;
        let srcs: Vec<_> = find_images(html).into_iter().map(|i| i.src).collect();
        assert_eq!(srcs, ["kept.png"]);
    }

    #[test]
    fn gt_inside_quoted_value_does_not_end_tag() {
        let images = find_images(r#"<img alt="a > b" src="x.png">"#);
        assert_eq!(images[0].alt, "a > b");
        assert_eq!(images[0].src, "x.png");
    }

    #[test]
    fn unterminated_markup_is_not_fatal() {
        assert!(find_images("<img src=\"x.png").is_empty());
        assert!(find_images("<!-- never closed <img src=a>").is_empty());
        assert_eq!(find_images("a < b <img src=c>").len(), 1);
    }

    #[test]
    fn entity_decoding() {
        assert_eq!(decode_entities("&lt;b&gt; &#39;q&#x27; &amp;amp;"), "<b> 'q' &amp;");
        assert_eq!(decode_entities("AT&T &bogus; &"), "AT&T &bogus; &");
        assert_eq!(decode_entities("caf&#233;"), "café");
    }

    #[test]
    fn latin1_named_entities() {
        assert_eq!(decode_entities("caf&eacute; &Uuml;ber &copy; &yuml;&nbsp;"), "café Über © ÿ\u{a0}");
        assert_eq!(decode_entities("&frac12; &times; &szlig;"), "½ × ß");
        assert_eq!(decode_entities("&EACUTE;"), "&EACUTE;");

        let images = find_images(r#"<img src="x.png" alt="caf&eacute;">"#);
        assert_eq!(images[0].alt, "café");
    }

    #[test]
    fn repeated_attribute_keeps_last_value() {
        let images = find_images("<img src=a.png src=b.png alt=one alt=two>");
        assert_eq!(images[0].src, "b.png");
        assert_eq!(images[0].alt, "two");
    }

    proptest! {
        #[test]
        fn strip_is_idempotent(s in "[a-z<>/ =\"]{0,40}") {
            let once = strip_tags(&s);
            prop_assert_eq!(strip_tags(&once), once);
        }

        #[test]
        fn strip_never_grows(s in "\\PC{0,60}") {
            prop_assert!(strip_tags(&s).len() <= s.len());
        }

        #[test]
        fn find_images_never_panics(s in "\\PC{0,80}") {
            let _ = find_images(&s);
        }
    }
}

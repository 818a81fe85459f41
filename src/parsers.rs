#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// One meaningful line of an INI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniLine<'a> {
    /// `[name]`
    Section(&'a str),
    /// `key = value` or `key: value`, both trimmed.
    Entry(&'a str, &'a str),
}

peg::parser! {
    /// includes grammars for INI lines and bracketed config lists.
    pub grammar parser() for str {
        /// matches spaces and tabs
        rule blank() = quiet!{[' ' | '\t']*}

        /// matches any whitespace, including line breaks
        rule ws() = quiet!{[' ' | '\t' | '\n' | '\r']*}

        /// matches the end of input
        rule eof() = ![_]

        /// matches a section name, which may itself contain brackets
        rule section_name() -> &'input str
            = $((!("]" blank() eof()) [_])+)

        /// parses a `[section]` header
        pub rule section_header() -> &'input str
            = blank() "[" name:section_name() "]" blank() eof() { name }

        /// parses a `key = value` or `key: value` entry; the key ends at the
        /// first delimiter
        pub rule entry() -> (&'input str, &'input str)
            = key:$((!['=' | ':'] [_])+) ['=' | ':'] value:$([_]*)
            {?
                let key = key.trim();
                if key.is_empty() { Err("a key before the delimiter") } else { Ok((key, value.trim())) }
            }

        /// parses a header or an entry
        pub rule ini_line() -> crate::parsers::IniLine<'input>
            = name:section_header() { crate::parsers::IniLine::Section(name) }
            / e:entry() { crate::parsers::IniLine::Entry(e.0, e.1) }

        /// matches one list item: everything up to a comma or the closing
        /// bracket
        rule list_item() -> &'input str
            = s:$((!("," / ("]" eof())) [_])*) { s.trim() }

        /// parses `[a, b, c]` into trimmed items, empty ones included; `[]`
        /// is the empty list
        pub rule list_items() -> Vec<&'input str>
            = "[" ws() "]" eof() { Vec::new() }
            / "[" items:(list_item() ** ",") "]" eof() { items }

        /// parses `[a, b, c]` into trimmed, non-empty items
        pub rule list() -> Vec<String>
            = items:list_items()
            {?
                if items.iter().any(|item| item.is_empty()) {
                    Err("a non-empty list item")
                } else {
                    Ok(items.into_iter().map(str::to_owned).collect())
                }
            }
    }
}

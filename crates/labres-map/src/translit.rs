//! Cyrillic-to-Latin transliteration.
//!
//! A fixed character table; many-to-one is acceptable (several Cyrillic
//! letters map to two-letter Latin digraphs, and the soft/hard signs map to
//! nothing). Characters outside the table pass through unchanged.

/// Transliterate Cyrillic characters in `text` to a Latin approximation.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match latin_for(ch) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(ch),
        }
    }
    out
}

fn latin_for(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'Ё' => "Yo",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "I",
        'Й' => "Y",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "H",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Sch",
        'Ъ' => "",
        'Ы' => "Y",
        'Ь' => "",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",
        _ => return None,
    };
    Some(mapped)
}

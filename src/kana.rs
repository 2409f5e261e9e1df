//! Built-in kana tables: glyph -> romanization (Hepburn).
//!
//! Glyphs are unique across all tables; romanizations are not (ぢ/じ both read "ji",
//! and every hiragana has a katakana twin).

/// Basic hiragana plus yōon digraphs.
pub const HIRAGANA: &[(&str, &str)] = &[
  ("あ", "a"), ("い", "i"), ("う", "u"), ("え", "e"), ("お", "o"),
  ("か", "ka"), ("き", "ki"), ("く", "ku"), ("け", "ke"), ("こ", "ko"),
  ("さ", "sa"), ("し", "shi"), ("す", "su"), ("せ", "se"), ("そ", "so"),
  ("た", "ta"), ("ち", "chi"), ("つ", "tsu"), ("て", "te"), ("と", "to"),
  ("な", "na"), ("に", "ni"), ("ぬ", "nu"), ("ね", "ne"), ("の", "no"),
  ("は", "ha"), ("ひ", "hi"), ("ふ", "fu"), ("へ", "he"), ("ほ", "ho"),
  ("ま", "ma"), ("み", "mi"), ("む", "mu"), ("め", "me"), ("も", "mo"),
  ("や", "ya"), ("ゆ", "yu"), ("よ", "yo"),
  ("ら", "ra"), ("り", "ri"), ("る", "ru"), ("れ", "re"), ("ろ", "ro"),
  ("わ", "wa"), ("を", "wo"), ("ん", "n"),
  ("きゃ", "kya"), ("きゅ", "kyu"), ("きょ", "kyo"),
  ("しゃ", "sha"), ("しゅ", "shu"), ("しょ", "sho"),
  ("ちゃ", "cha"), ("ちゅ", "chu"), ("ちょ", "cho"),
  ("にゃ", "nya"), ("にゅ", "nyu"), ("にょ", "nyo"),
  ("ひゃ", "hya"), ("ひゅ", "hyu"), ("ひょ", "hyo"),
  ("みゃ", "mya"), ("みゅ", "myu"), ("みょ", "myo"),
  ("りゃ", "rya"), ("りゅ", "ryu"), ("りょ", "ryo"),
];

/// Basic katakana plus yōon digraphs.
pub const KATAKANA: &[(&str, &str)] = &[
  ("ア", "a"), ("イ", "i"), ("ウ", "u"), ("エ", "e"), ("オ", "o"),
  ("カ", "ka"), ("キ", "ki"), ("ク", "ku"), ("ケ", "ke"), ("コ", "ko"),
  ("サ", "sa"), ("シ", "shi"), ("ス", "su"), ("セ", "se"), ("ソ", "so"),
  ("タ", "ta"), ("チ", "chi"), ("ツ", "tsu"), ("テ", "te"), ("ト", "to"),
  ("ナ", "na"), ("ニ", "ni"), ("ヌ", "nu"), ("ネ", "ne"), ("ノ", "no"),
  ("ハ", "ha"), ("ヒ", "hi"), ("フ", "fu"), ("ヘ", "he"), ("ホ", "ho"),
  ("マ", "ma"), ("ミ", "mi"), ("ム", "mu"), ("メ", "me"), ("モ", "mo"),
  ("ヤ", "ya"), ("ユ", "yu"), ("ヨ", "yo"),
  ("ラ", "ra"), ("リ", "ri"), ("ル", "ru"), ("レ", "re"), ("ロ", "ro"),
  ("ワ", "wa"), ("ヲ", "wo"), ("ン", "n"),
  ("キャ", "kya"), ("キュ", "kyu"), ("キョ", "kyo"),
  ("シャ", "sha"), ("シュ", "shu"), ("ショ", "sho"),
  ("チャ", "cha"), ("チュ", "chu"), ("チョ", "cho"),
  ("ニャ", "nya"), ("ニュ", "nyu"), ("ニョ", "nyo"),
  ("ヒャ", "hya"), ("ヒュ", "hyu"), ("ヒョ", "hyo"),
  ("ミャ", "mya"), ("ミュ", "myu"), ("ミョ", "myo"),
  ("リャ", "rya"), ("リュ", "ryu"), ("リョ", "ryo"),
];

/// Voiced (dakuten) and half-voiced (handakuten) variants, both scripts.
pub const DAKUTEN: &[(&str, &str)] = &[
  ("が", "ga"), ("ぎ", "gi"), ("ぐ", "gu"), ("げ", "ge"), ("ご", "go"),
  ("ざ", "za"), ("じ", "ji"), ("ず", "zu"), ("ぜ", "ze"), ("ぞ", "zo"),
  ("だ", "da"), ("ぢ", "ji"), ("づ", "zu"), ("で", "de"), ("ど", "do"),
  ("ば", "ba"), ("び", "bi"), ("ぶ", "bu"), ("べ", "be"), ("ぼ", "bo"),
  ("ぱ", "pa"), ("ぴ", "pi"), ("ぷ", "pu"), ("ぺ", "pe"), ("ぽ", "po"),
  ("ガ", "ga"), ("ギ", "gi"), ("グ", "gu"), ("ゲ", "ge"), ("ゴ", "go"),
  ("ザ", "za"), ("ジ", "ji"), ("ズ", "zu"), ("ゼ", "ze"), ("ゾ", "zo"),
  ("ダ", "da"), ("ヂ", "ji"), ("ヅ", "zu"), ("デ", "de"), ("ド", "do"),
  ("バ", "ba"), ("ビ", "bi"), ("ブ", "bu"), ("ベ", "be"), ("ボ", "bo"),
  ("パ", "pa"), ("ピ", "pi"), ("プ", "pu"), ("ペ", "pe"), ("ポ", "po"),
];

/// All tables in catalog order.
pub fn all_tables() -> [&'static [(&'static str, &'static str)]; 3] {
  [HIRAGANA, KATAKANA, DAKUTEN]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  #[test]
  fn glyphs_are_unique_across_tables() {
    let mut seen = HashSet::new();
    for table in all_tables() {
      for (glyph, _) in table {
        assert!(seen.insert(*glyph), "duplicate glyph {glyph}");
      }
    }
    assert_eq!(seen.len(), 67 + 67 + 50);
  }

  #[test]
  fn romanizations_are_ascii_lowercase() {
    for table in all_tables() {
      for (glyph, romaji) in table {
        assert!(
          !romaji.is_empty() && romaji.chars().all(|c| c.is_ascii_lowercase()),
          "{glyph} has bad romanization {romaji:?}"
        );
      }
    }
  }
}

//! ドキュメントコメント内の`array<K,V>`・`object<K,V>`表記の正規化
//!
//! 正規表現では入れ子の山括弧内のカンマを扱えないため、
//! 一文字ずつ走査する小さな状態機械で処理する。
//! 状態は「現在のセグメント」と「開いている総称型の開始位置スタック」。

/// 総称型表記を型変換用の文字列に正規化する
///
/// - `array<int,V>` は数値配列として `array<V>` になる
/// - `array<K,V>`（`K`が`int`以外）は連想配列として `object<K,V>` になる
/// - `object<K,V>` はそのまま
///
/// 最初に開いた山括弧が閉じた時点で走査を終え、残りの文字列はそのまま付け足す。
pub fn normalize_generic(text: &str) -> String {
    let text = text.trim();
    let mut out = String::with_capacity(text.len() + 1);
    let mut segment = String::new();
    let mut open: Vec<usize> = Vec::new();
    let mut rest_from = text.len();

    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => {
                open.push(out.len() - segment.len());
                out.push('<');
                segment.clear();
            }
            ',' => {
                match open.last() {
                    Some(&start) if keyword_at(&out, start, "array") => {
                        if segment.eq_ignore_ascii_case("int") {
                            out.truncate(out.len() - segment.len());
                        } else {
                            out.replace_range(start..start + "array".len(), "object");
                            out.push(',');
                        }
                    }
                    _ => out.push(','),
                }
                segment.clear();
            }
            '>' => {
                open.pop();
                out.push('>');
                segment.clear();
                if open.is_empty() {
                    rest_from = idx + 1;
                    break;
                }
            }
            c if c.is_whitespace() => {}
            c => {
                out.push(c);
                segment.push(c);
            }
        }
    }

    out.push_str(&text[rest_from..]);
    out
}

/// `out[start..]`が`keyword<`で始まるか
fn keyword_at(out: &str, start: usize, keyword: &str) -> bool {
    let end = start + keyword.len();
    out.get(start..end)
        .is_some_and(|s| s.eq_ignore_ascii_case(keyword))
        && out[end..].starts_with('<')
}

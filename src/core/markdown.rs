use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3})\s+").unwrap());
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\s+").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// 行內片段。不支援巢狀與跳脫
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Em(String),
}

/// 區塊節點，依來源行序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Inline> },
    List { items: Vec<Vec<Inline>> },
    Paragraph { spans: Vec<Inline> },
}

/// 將受限子集的 Markdown 轉成區塊樹。
///
/// 單趟逐行掃描：1-3 級標題、`- ` 清單項、空行分段。
/// 清單累積器只被空行或標題打斷，中間的普通行不會切開它。
/// 其他語法（表格、連結、程式碼區塊等）原樣落入段落文字。
pub fn render(md: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut list: Vec<Vec<Inline>> = Vec::new();
    let mut para: Vec<String> = Vec::new();

    for raw_line in md.trim().split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if let Some(m) = HEADING_RE.find(line) {
            flush_list(&mut list, &mut blocks);
            flush_para(&mut para, &mut blocks);
            let level = line.chars().take_while(|c| *c == '#').count() as u8;
            blocks.push(Block::Heading {
                level,
                spans: inline_spans(&line[m.end()..]),
            });
            continue;
        }

        if let Some(m) = LIST_RE.find(line) {
            // 清單項先關閉進行中的段落，清單本身繼續累積
            flush_para(&mut para, &mut blocks);
            list.push(inline_spans(&line[m.end()..]));
            continue;
        }

        if line.trim().is_empty() {
            flush_list(&mut list, &mut blocks);
            flush_para(&mut para, &mut blocks);
            continue;
        }

        para.push(line.trim().to_string());
    }

    flush_list(&mut list, &mut blocks);
    flush_para(&mut para, &mut blocks);
    blocks
}

/// 套用行內格式：先 `**bold**` 後 `*italic*`，皆為非貪婪、全域、最左優先
pub fn inline_spans(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut last = 0;
    for caps in BOLD_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last {
            push_italic_spans(&text[last..whole.start()], &mut spans);
        }
        spans.push(Inline::Strong(caps[1].to_string()));
        last = whole.end();
    }
    if last < text.len() {
        push_italic_spans(&text[last..], &mut spans);
    }
    spans
}

fn push_italic_spans(text: &str, out: &mut Vec<Inline>) {
    let mut last = 0;
    for caps in ITALIC_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        if whole.start() > last {
            out.push(Inline::Text(text[last..whole.start()].to_string()));
        }
        out.push(Inline::Em(caps[1].to_string()));
        last = whole.end();
    }
    if last < text.len() {
        out.push(Inline::Text(text[last..].to_string()));
    }
}

fn flush_list(list: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>) {
    if !list.is_empty() {
        blocks.push(Block::List {
            items: std::mem::take(list),
        });
    }
}

fn flush_para(para: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !para.is_empty() {
        let joined = std::mem::take(para).join(" ");
        blocks.push(Block::Paragraph {
            spans: inline_spans(&joined),
        });
    }
}

//! 已解析的报告文档 - 基础设施层
//!
//! 只暴露查询能力：按子串找表格行、读取行内所有单元格文字、判断某个元素文字是否存在。
//! 不认识指标，也不关心报告状态。

use regex::{Captures, Regex};

use crate::error::AppResult;

/// 表格行句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowId(usize);

/// 已解析文档提供的查询能力
pub trait ParsedDocument: Send + Sync {
    /// 是否存在文字（去除首尾空白后）恰好等于 `text` 的 `<tag>` 元素
    fn has_element_text(&self, tag: &str, text: &str) -> bool;

    /// 第一个"第一个单元格包含 `needle`"的表格行
    fn find_row(&self, needle: &str) -> Option<RowId>;

    /// 行内所有 `<td>` 的文字
    fn row_cells(&self, row: RowId) -> Vec<String>;
}

/// HTML 报告文档
///
/// 解析时就把所有表格行和元素的文字规范化好，之后的查询不再接触原始 HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    rows: Vec<Vec<String>>,
    /// (小写标签名, 元素内全部文字)，不含表格结构标签
    elements: Vec<(String, String)>,
}

impl HtmlDocument {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl ParsedDocument for HtmlDocument {
    fn has_element_text(&self, tag: &str, text: &str) -> bool {
        let tag = tag.to_ascii_lowercase();
        let text = text.trim();
        self.elements
            .iter()
            .any(|(name, content)| *name == tag && content == text)
    }

    fn find_row(&self, needle: &str) -> Option<RowId> {
        self.rows
            .iter()
            .position(|cells| cells.first().is_some_and(|first| first.contains(needle)))
            .map(RowId)
    }

    fn row_cells(&self, row: RowId) -> Vec<String> {
        self.rows.get(row.0).cloned().unwrap_or_default()
    }
}

/// 没有结束标签的元素
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// 只作为容器的标签，不记录文字
const STRUCTURAL_TAGS: &[&str] = &[
    "html", "head", "body", "table", "thead", "tbody", "tfoot", "tr", "td", "th",
];

/// HTML 解析器
///
/// 正则只编译一次，可在多个抓取之间共享
#[derive(Debug, Clone)]
pub struct HtmlParser {
    tag_re: Regex,
    strip_re: Regex,
    entity_re: Regex,
    noise_re: Regex,
}

impl HtmlParser {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            tag_re: Regex::new(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*?(/?)>")?,
            strip_re: Regex::new(r"(?s)<[^>]*>")?,
            entity_re: Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);")?,
            noise_re: Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")?,
        })
    }

    /// 解析 HTML 文本
    ///
    /// 按标签顺序扫描并跟踪表格嵌套：只有最内层的 `<tr>` 成为行，
    /// 只有直属该行的 `<td>` 成为单元格
    pub fn parse(&self, html: &str) -> HtmlDocument {
        let html = self.noise_re.replace_all(html, "");
        let mut scanner = Scanner::new(self, &html);

        for cap in self.tag_re.captures_iter(&html) {
            let Some(tag) = cap.get(0) else { continue };
            let name = cap[2].to_ascii_lowercase();

            if cap[1].is_empty() {
                scanner.open(&name, tag.start(), tag.end(), !cap[3].is_empty());
            } else {
                scanner.close(&name, tag.start());
            }
        }

        scanner.finish()
    }

    /// 去标签、解码实体、合并空白
    fn text_of(&self, fragment: &str) -> String {
        let stripped = self.strip_re.replace_all(fragment, " ");
        let decoded = self
            .entity_re
            .replace_all(&stripped, |cap: &Captures| decode_entity(&cap[1]).unwrap_or_else(|| cap[0].to_string()));
        normalize_ws(&decoded)
    }
}

/// 扫描中尚未闭合的行
struct OpenRow {
    table_depth: usize,
    cells: Vec<String>,
    /// 当前 `<td>` 内容的起始位置
    cell_start: Option<usize>,
    has_nested_rows: bool,
}

/// 扫描中尚未闭合的元素
struct OpenElement {
    name: String,
    content_start: usize,
}

/// 一次解析的扫描状态
struct Scanner<'a> {
    parser: &'a HtmlParser,
    html: &'a str,
    table_depth: usize,
    open_rows: Vec<OpenRow>,
    open_elements: Vec<OpenElement>,
    rows: Vec<Vec<String>>,
    elements: Vec<(String, String)>,
}

impl<'a> Scanner<'a> {
    fn new(parser: &'a HtmlParser, html: &'a str) -> Self {
        Self {
            parser,
            html,
            table_depth: 0,
            open_rows: Vec::new(),
            open_elements: Vec::new(),
            rows: Vec::new(),
            elements: Vec::new(),
        }
    }

    fn open(&mut self, name: &str, start: usize, end: usize, self_closing: bool) {
        match name {
            "table" => self.table_depth += 1,
            "tr" => {
                // 同一表格里上一行没有写 </tr>
                if self.current_row_open() {
                    self.close_row(start);
                }
                self.open_rows.push(OpenRow {
                    table_depth: self.table_depth,
                    cells: Vec::new(),
                    cell_start: None,
                    has_nested_rows: false,
                });
            }
            "td" | "th" => {
                self.finish_cell(start);
                if name == "td" && self.current_row_open() {
                    if let Some(row) = self.open_rows.last_mut() {
                        row.cell_start = Some(end);
                    }
                }
            }
            _ => {}
        }

        if !self_closing && !VOID_TAGS.contains(&name) && !STRUCTURAL_TAGS.contains(&name) {
            self.open_elements.push(OpenElement {
                name: name.to_string(),
                content_start: end,
            });
        }
    }

    fn close(&mut self, name: &str, start: usize) {
        match name {
            "td" | "th" => self.finish_cell(start),
            "tr" => {
                if self.current_row_open() {
                    self.close_row(start);
                }
            }
            "table" => {
                while self.current_row_open() {
                    self.close_row(start);
                }
                self.table_depth = self.table_depth.saturating_sub(1);
            }
            _ => {}
        }

        if let Some(idx) = self.open_elements.iter().rposition(|e| e.name == name) {
            let element = &self.open_elements[idx];
            let text = self.parser.text_of(&self.html[element.content_start..start]);
            self.elements.push((element.name.clone(), text));
            self.open_elements.truncate(idx);
        }
    }

    /// 栈顶的行属于当前表格
    fn current_row_open(&self) -> bool {
        self.open_rows
            .last()
            .is_some_and(|row| row.table_depth == self.table_depth)
    }

    fn finish_cell(&mut self, at: usize) {
        let depth = self.table_depth;
        let Some(row) = self.open_rows.last_mut().filter(|row| row.table_depth == depth) else {
            return;
        };
        if let Some(start) = row.cell_start.take() {
            row.cells.push(self.parser.text_of(&self.html[start..at]));
        }
    }

    /// 闭合栈顶的行；包含嵌套行的外层行被丢弃
    fn close_row(&mut self, at: usize) {
        self.finish_cell(at);
        let Some(row) = self.open_rows.pop() else {
            return;
        };
        if let Some(parent) = self.open_rows.last_mut() {
            parent.has_nested_rows = true;
        }
        if !row.has_nested_rows {
            self.rows.push(row.cells);
        }
    }

    fn finish(mut self) -> HtmlDocument {
        let end = self.html.len();
        while !self.open_rows.is_empty() {
            self.table_depth = self.open_rows.last().map_or(0, |row| row.table_depth);
            self.close_row(end);
        }

        HtmlDocument {
            rows: self.rows,
            elements: self.elements,
        }
    }
}

/// 解码单个实体（不含 `&` 和 `;`），不认识时返回 None
fn decode_entity(entity: &str) -> Option<String> {
    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).map(String::from);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from);
    }
    let ch = match entity {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "auml" => 'ä',
        "Auml" => 'Ä',
        "ouml" => 'ö',
        "Ouml" => 'Ö',
        "aring" => 'å',
        "Aring" => 'Å',
        "eacute" => 'é',
        "uuml" => 'ü',
        "ndash" => '–',
        "minus" => '−',
        "plusmn" => '±',
        _ => return None,
    };
    Some(ch.to_string())
}

/// 把连续空白合并为一个空格并去除首尾空白
fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

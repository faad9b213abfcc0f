//! 태그 칩 컴포넌트
//!
//! 선택된 태그 하나를 `<button>`으로 그립니다. 앞에는 제거(×) 아이콘,
//! 뒤에는 태그 이름이 옵니다. 클래스 이름은 호출자가 정합니다.

use crate::models::TagOption;

const CROSS_ICON: &str = r#"<svg class="chip-remove" viewBox="0 0 15 15" width="15" height="15" aria-hidden="true"><path d="M11.8 3.2 3.2 11.8M3.2 3.2l8.6 8.6" stroke="currentColor" stroke-width="1.2"/></svg>"#;

/// 칩 요소에 붙는 CSS 클래스
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipClassNames {
    /// 버튼 전체
    pub tag: String,
    /// 이름 `<span>`
    pub name: String,
}

impl Default for ChipClassNames {
    fn default() -> Self {
        Self {
            tag: "tag-chip".to_string(),
            name: "tag-chip-name".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub option: TagOption,
    pub class_names: ChipClassNames,
}

impl TagChip {
    pub fn new(option: TagOption) -> Self {
        Self {
            option,
            class_names: ChipClassNames::default(),
        }
    }

    pub fn with_class_names(mut self, class_names: ChipClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    pub fn render(&self) -> String {
        format!(
            r#"<button type="button" class="{}" data-value="{}">{}<span class="{}">{}</span></button>"#,
            escape_html(&self.class_names.tag),
            escape_html(&self.option.value),
            CROSS_ICON,
            escape_html(&self.class_names.name),
            escape_html(&self.option.label),
        )
    }
}

/// 칩 여러 개를 한 줄로 이어 그립니다.
pub fn render_chips<'a>(chips: impl IntoIterator<Item = &'a TagChip>) -> String {
    chips.into_iter().map(TagChip::render).collect()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, label: &str) -> TagOption {
        TagOption {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn renders_button_with_icon_then_label() {
        let html = TagChip::new(option("3", "rust")).render();

        assert!(html.starts_with(r#"<button type="button" class="tag-chip" data-value="3">"#));
        let icon = html.find("<svg").unwrap();
        let label = html.find(r#"<span class="tag-chip-name">rust</span>"#).unwrap();
        assert!(icon < label);
        assert!(html.ends_with("</button>"));
    }

    #[test]
    fn label_and_classes_are_escaped() {
        let chip = TagChip::new(option("1", "<b>\"x\" & y</b>")).with_class_names(ChipClassNames {
            tag: "a\"b".to_string(),
            name: "n".to_string(),
        });
        let html = chip.render();

        assert!(html.contains("&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;"));
        assert!(html.contains(r#"class="a&quot;b""#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn render_chips_concatenates_in_order() {
        let chips = vec![TagChip::new(option("1", "a")), TagChip::new(option("2", "b"))];
        let html = render_chips(&chips);
        assert!(html.find(">a</span>").unwrap() < html.find(">b</span>").unwrap());
    }
}

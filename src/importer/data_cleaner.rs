// ==========================================
// 商品目录对账导出 - 数据清洗器
// ==========================================
// 职责: TRIM / UPPER / NULL 标准化 / 价格解析 / 章节号补零
// ==========================================

use crate::domain::types::normalize_sku;
use crate::importer::error::{ImportError, ImportResult};

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本字段（TRIM，可选 UPPER）
    pub fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 清洗 SKU（TRIM，保留大小写）
    pub fn clean_sku(&self, value: Option<String>) -> Option<String> {
        self.normalize_null(value)
    }

    /// SKU 规范化键（TRIM + UPPER）
    pub fn sku_key(&self, value: &str) -> String {
        normalize_sku(value)
    }

    /// 章节号标准化（纯数字补足两位: "1" → "01"）
    pub fn normalize_chapter(&self, value: Option<String>) -> Option<String> {
        self.normalize_null(value).map(|v| {
            if v.chars().all(|c| c.is_ascii_digit()) {
                match v.parse::<u32>() {
                    Ok(n) => format!("{:02}", n),
                    Err(_) => v,
                }
            } else {
                v
            }
        })
    }

    /// 解析价格
    ///
    /// # 规则
    /// - 空值 → Ok(None)
    /// - 去除货币符号与空白（含不间断空格）
    /// - 同时出现 ',' 与 '.' 时，靠后的为小数点
    /// - 无法解析 → TypeConversionError（调用方降级为缺失）
    pub fn parse_price(&self, value: &str, row: usize, field: &str) -> ImportResult<Option<f64>> {
        let compact: String = value
            .trim()
            .trim_end_matches("EUR")
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '€')
            .collect();

        if compact.is_empty() {
            return Ok(None);
        }

        let normalized = match (compact.rfind(','), compact.rfind('.')) {
            (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => compact.replace(',', ""),
            (Some(_), None) => compact.replace(',', "."),
            _ => compact,
        };

        match normalized.parse::<f64>() {
            Ok(price) if price.is_finite() => Ok(Some(price)),
            _ => Err(ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                message: format!("无法解析为价格: {}", value),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  hello  ", false), "hello");
        assert_eq!(cleaner.clean_text("  hello  ", true), "HELLO");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some("  value  ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_clean_sku_keeps_case() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.clean_sku(Some(" e341 ".to_string())),
            Some("e341".to_string())
        );
        assert_eq!(cleaner.sku_key(" e341 "), "E341");
    }

    #[test]
    fn test_normalize_chapter() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.normalize_chapter(Some("1".to_string())),
            Some("01".to_string())
        );
        assert_eq!(
            cleaner.normalize_chapter(Some(" 08 ".to_string())),
            Some("08".to_string())
        );
        assert_eq!(
            cleaner.normalize_chapter(Some("X1".to_string())),
            Some("X1".to_string())
        );
        assert_eq!(cleaner.normalize_chapter(Some(" ".to_string())), None);
    }

    #[test]
    fn test_parse_price_formats() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_price("12.5", 2, "price").unwrap(), Some(12.5));
        assert_eq!(cleaner.parse_price("12,50", 2, "price").unwrap(), Some(12.5));
        assert_eq!(cleaner.parse_price("€ 7", 2, "price").unwrap(), Some(7.0));
        assert_eq!(cleaner.parse_price("1.234,50", 2, "price").unwrap(), Some(1234.5));
        assert_eq!(cleaner.parse_price("1,234.50", 2, "price").unwrap(), Some(1234.5));
        assert_eq!(cleaner.parse_price("9.90 EUR", 2, "price").unwrap(), Some(9.9));
        assert_eq!(cleaner.parse_price("   ", 2, "price").unwrap(), None);
    }

    #[test]
    fn test_parse_price_malformed() {
        let cleaner = DataCleaner;
        let err = cleaner.parse_price("pēc pieprasījuma", 14, "price").unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 14, .. }));
        assert!(cleaner.parse_price("inf", 3, "price").is_err());
    }
}

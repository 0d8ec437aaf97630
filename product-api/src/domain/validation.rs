//! 请求体校验
//!
//! 字段规则以声明式的 [`Shape`] 描述, 由 [`validate`] 统一检查一个尚未反序列化的 JSON 对象。
//! 校验通过后再转换成强类型的 DTO。

use serde_json::{Map, Value};
use std::fmt;

/// 字段约束类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 必填, 非空字符串
    RequiredString,
    /// 必填, 大于 0 的数字
    PositiveNumber,
    /// 可选字符串, 缺省或 null 时不检查
    OptionalString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    IsNotEmpty,
    IsString,
    IsPositive,
    IsNumber,
}

impl Check {
    fn passes(self, value: Option<&Value>) -> bool {
        match self {
            Check::IsNotEmpty => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(_) => true,
            },
            Check::IsString => matches!(value, Some(Value::String(_))),
            Check::IsNumber => matches!(value, Some(Value::Number(_))),
            Check::IsPositive => match value {
                Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n > 0.0),
                _ => false,
            },
        }
    }

    fn message(self, field: &str) -> String {
        match self {
            Check::IsNotEmpty => format!("{field} should not be empty"),
            Check::IsString => format!("{field} must be a string"),
            Check::IsPositive => format!("{field} must be a positive number"),
            Check::IsNumber => format!("{field} must be a number conforming to the specified constraints"),
        }
    }
}

impl FieldKind {
    // 顺序决定同一字段下错误信息的先后
    fn checks(self) -> &'static [Check] {
        match self {
            FieldKind::RequiredString => &[Check::IsNotEmpty, Check::IsString],
            FieldKind::PositiveNumber => &[Check::IsPositive, Check::IsNumber],
            FieldKind::OptionalString => &[Check::IsString],
        }
    }

    fn is_optional(self) -> bool {
        matches!(self, FieldKind::OptionalString)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// 一组字段规则
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    pub fields: &'static [FieldRule],
    /// 为 true 时缺省 / null 字段一律跳过 (部分更新)
    pub skip_missing: bool,
}

const PRODUCT_FIELDS: &[FieldRule] = &[
    FieldRule { name: "name", kind: FieldKind::RequiredString },
    FieldRule { name: "price", kind: FieldKind::PositiveNumber },
    FieldRule { name: "description", kind: FieldKind::OptionalString },
];

pub const CREATE_PRODUCT: Shape = Shape {
    fields: PRODUCT_FIELDS,
    skip_missing: false,
};

pub const UPDATE_PRODUCT: Shape = Shape {
    fields: PRODUCT_FIELDS,
    skip_missing: true,
};

/// 单个字段的全部违规信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations
            .iter()
            .flat_map(|v| v.messages.iter().map(String::as_str))
    }
}

/// 同一字段内用 `,` 连接, 字段之间用 `, ` 连接
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .violations
            .iter()
            .map(|v| v.messages.join(","))
            .collect();
        write!(f, "{}", groups.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

pub fn validate(shape: &Shape, payload: &Map<String, Value>) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();

    for rule in shape.fields {
        let value = payload.get(rule.name);

        if is_missing(value) && (shape.skip_missing || rule.kind.is_optional()) {
            continue;
        }

        let messages: Vec<String> = rule
            .kind
            .checks()
            .iter()
            .filter(|check| !check.passes(value))
            .map(|check| check.message(rule.name))
            .collect();

        if !messages.is_empty() {
            violations.push(FieldViolation {
                field: rule.name,
                messages,
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { violations })
    }
}

//! Project Context - Value Objects

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 项目唯一标识
///
/// 后端分配的不透明字符串；离线创建时为 `local-{毫秒时间戳}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 生成离线（本地）项目 ID
    pub fn offline() -> Self {
        Self(format!("local-{}", Utc::now().timestamp_millis()))
    }

    /// 是否为离线创建的 ID
    pub fn is_offline(&self) -> bool {
        self.0.starts_with("local-")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// 项目标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Result<Self, &'static str> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err("标题不能为空");
        }
        if title.len() > 200 {
            return Err("标题长度不能超过200字符");
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 写作视角（仅影响提示词构造）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WritingStyle {
    #[serde(rename = "first-person")]
    FirstPerson,
    #[serde(rename = "third-person")]
    ThirdPerson,
}

impl WritingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            WritingStyle::FirstPerson => "first-person",
            WritingStyle::ThirdPerson => "third-person",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first-person" => Some(WritingStyle::FirstPerson),
            "third-person" => Some(WritingStyle::ThirdPerson),
            _ => None,
        }
    }

    /// 提示词中使用的视角描述
    pub fn prompt_description(&self) -> &'static str {
        match self {
            WritingStyle::FirstPerson => "first person (我)",
            WritingStyle::ThirdPerson => "third person (他/她)",
        }
    }
}

impl Default for WritingStyle {
    fn default() -> Self {
        WritingStyle::ThirdPerson
    }
}

/// 目标篇幅档位
///
/// 仅用于分析中的完成度估算，不做硬性约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLength {
    Short,
    Medium,
    Long,
    Epic,
}

impl TargetLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLength::Short => "short",
            TargetLength::Medium => "medium",
            TargetLength::Long => "long",
            TargetLength::Epic => "epic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "short" => Some(TargetLength::Short),
            "medium" => Some(TargetLength::Medium),
            "long" => Some(TargetLength::Long),
            "epic" => Some(TargetLength::Epic),
            _ => None,
        }
    }

    /// 各档位对应的近似目标词数
    pub fn target_words(&self) -> usize {
        match self {
            TargetLength::Short => 50_000,
            TargetLength::Medium => 80_000,
            TargetLength::Long => 120_000,
            TargetLength::Epic => 200_000,
        }
    }
}

impl Default for TargetLength {
    fn default() -> Self {
        TargetLength::Medium
    }
}

/// 项目状态
///
/// 由 UI 动作设置的建议性状态，核心不做状态机校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    Writing,
    Completed,
    Paused,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Writing => "writing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Paused => "paused",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planning" => Some(ProjectStatus::Planning),
            "writing" => Some(ProjectStatus::Writing),
            "completed" => Some(ProjectStatus::Completed),
            "paused" => Some(ProjectStatus::Paused),
            _ => None,
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Planning
    }
}

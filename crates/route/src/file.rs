//! 路线文件解析模块
//!
//! 每行一个路点，格式 `lat,lon`。空行直接跳过；无法解析的非空行
//! 逐行告警并跳过，不影响其余行。

use std::path::{Path, PathBuf};

use contracts::{AgentError, RouteSource, Waypoint};
use tracing::warn;

/// 路线文件解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedRoute {
    /// 成功解析的路点
    pub waypoints: Vec<Waypoint>,

    /// 被跳过的行号 (1-based)
    pub skipped_lines: Vec<usize>,
}

/// 解析路线文件内容
///
/// 行内多余的逗号分隔字段被忽略，只取前两个。
pub fn parse_route(content: &str) -> ParsedRoute {
    let mut parsed = ParsedRoute::default();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(waypoint) => parsed.waypoints.push(waypoint),
            None => {
                warn!(line = line_no, content = %line, "Skipping malformed route line");
                parsed.skipped_lines.push(line_no);
            }
        }
    }

    parsed
}

/// 解析单行 `lat,lon`
fn parse_line(line: &str) -> Option<Waypoint> {
    let mut fields = line.split(',');
    let lat: f64 = fields.next()?.trim().parse().ok()?;
    let lon: f64 = fields.next()?.trim().parse().ok()?;
    Some(Waypoint::new(lat, lon))
}

/// 基于文件的路线来源
#[derive(Debug, Clone)]
pub struct FileRouteSource {
    path: PathBuf,
}

impl FileRouteSource {
    /// 创建文件来源
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 路线文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取并解析，保留跳过行信息 (供 validate 使用)
    ///
    /// # Errors
    /// 文件不可读时返回 [`AgentError::RouteLoad`]。
    pub fn parse(&self) -> Result<ParsedRoute, AgentError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AgentError::route_load(self.describe(), e.to_string()))?;
        Ok(parse_route(&content))
    }
}

impl RouteSource for FileRouteSource {
    fn describe(&self) -> String {
        format!("file '{}'", self.path.display())
    }

    fn load(&self) -> Result<Vec<Waypoint>, AgentError> {
        Ok(self.parse()?.waypoints)
    }
}

/// 固定内存路线来源 (测试与内置路线)
#[derive(Debug, Clone)]
pub struct StaticRouteSource {
    name: String,
    waypoints: Vec<Waypoint>,
}

impl StaticRouteSource {
    /// 创建固定来源
    pub fn new(name: impl Into<String>, waypoints: Vec<Waypoint>) -> Self {
        Self {
            name: name.into(),
            waypoints,
        }
    }
}

impl RouteSource for StaticRouteSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<Vec<Waypoint>, AgentError> {
        Ok(self.waypoints.clone())
    }
}

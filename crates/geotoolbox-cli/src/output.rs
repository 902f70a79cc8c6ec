use console::style;
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

use geotoolbox_core::{GeoPoint, OrderedLine, Stratigraphy};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    pub fn success(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", style("✓").green().bold(), message);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "status": "success",
                    "message": message.to_string(),
                }));
            }
        }
    }

    pub fn info(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{} {}", style("ℹ").blue().bold(), message);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "status": "info",
                    "message": message.to_string(),
                }));
            }
        }
    }

    pub fn warning(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", style("⚠").yellow().bold(), message);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "warning",
                    "message": message.to_string(),
                });
                eprintln!("{}", output);
            }
        }
    }

    /// Rounded table for humans, `{"status":"success","data":[..]}` for JSON
    pub fn table<T: Tabled + Serialize>(&self, data: Vec<T>) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                if data.is_empty() {
                    println!("{}", style("(no data)").dim());
                } else {
                    let mut table = Table::new(data);
                    table.with(Style::rounded());
                    println!("{}", table);
                }
                Ok(())
            }
            OutputFormat::Json => self.result(data),
        }
    }

    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "success",
                    "data": data,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    pub fn section(&self, title: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("\n{}", style(title).bold().underlined());
        }
    }
}

/// One line per row in listings
#[derive(Debug, Tabled, Serialize)]
pub struct LineRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Horizon")]
    pub horizon: String,
    #[tabled(rename = "Points")]
    pub points: usize,
    #[tabled(rename = "Closed")]
    pub closed: bool,
}

impl From<&OrderedLine> for LineRow {
    fn from(line: &OrderedLine) -> Self {
        Self {
            id: line.id().map(|id| id.0).unwrap_or(-1),
            name: line.name().to_string(),
            horizon: line.horizon().map(|h| h.name().to_string()).unwrap_or_default(),
            points: line.len(),
            closed: line.is_closed(),
        }
    }
}

#[derive(Debug, Tabled, Serialize)]
pub struct PointRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Pos")]
    pub line_pos: i32,
    #[tabled(rename = "Easting")]
    pub easting: f64,
    #[tabled(rename = "Northing")]
    pub northing: f64,
    #[tabled(rename = "Altitude", display_with = "display_altitude")]
    pub altitude: Option<f64>,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Horizon")]
    pub horizon: String,
}

fn display_altitude(altitude: &Option<f64>) -> String {
    altitude.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string())
}

impl From<&GeoPoint> for PointRow {
    fn from(point: &GeoPoint) -> Self {
        Self {
            id: point.id().map(|id| id.0).unwrap_or(-1),
            line_pos: point.line_pos(),
            easting: point.easting(),
            northing: point.northing(),
            altitude: point.has_z().then(|| point.altitude()),
            name: point.name().to_string(),
            horizon: point.horizon().map(|h| h.name().to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Tabled, Serialize)]
pub struct HorizonRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Age", display_with = "display_age")]
    pub age: f64,
}

fn display_age(age: &f64) -> String {
    if *age < 0.0 {
        "unknown".to_string()
    } else {
        age.to_string()
    }
}

impl From<&Stratigraphy> for HorizonRow {
    fn from(horizon: &Stratigraphy) -> Self {
        Self {
            id: horizon.id().map(|id| id.0).unwrap_or(-1),
            name: horizon.name().to_string(),
            age: horizon.age(),
        }
    }
}

#[derive(Debug, Tabled, Serialize)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_row_from_unsaved_line() {
        let line = OrderedLine::new(
            true,
            Stratigraphy::named("mu"),
            vec![GeoPoint::new(0.0, 0.0, None), GeoPoint::new(1.0, 0.0, None)],
        )
        .unwrap()
        .with_name("Outline");

        let row = LineRow::from(&line);
        assert_eq!(row.id, -1);
        assert_eq!(row.horizon, "mu");
        assert_eq!(row.points, 2);
        assert!(row.closed);
    }

    #[test]
    fn test_horizon_row_marks_unknown_age() {
        let row = HorizonRow::from(&Stratigraphy::named("km"));
        assert_eq!(row.id, -1);
        assert_eq!(display_age(&row.age), "unknown");
        assert_eq!(display_age(&240.0), "240");
    }

    #[test]
    fn test_point_row_hides_missing_altitude() {
        let row = PointRow::from(&GeoPoint::new(1.0, 2.0, None));
        assert_eq!(row.altitude, None);
        assert_eq!(display_altitude(&row.altitude), "-");

        let row = PointRow::from(&GeoPoint::new(1.0, 2.0, Some(3.5)));
        assert_eq!(row.altitude, Some(3.5));
    }
}

use log::warn;
use serde_json::Value;

/// One named table of a stats API response
#[derive(Debug, Clone, Copy)]
pub struct ResultSet<'a> {
    name: &'a str,
    headers: &'a [Value],
    rows: &'a [Value],
}

impl<'a> ResultSet<'a> {
    /// Find the result set called `name` in a response body
    pub fn find(data: &'a Value, name: &str) -> Option<Self> {
        let found = extract_result_sets(data)?
            .iter()
            .filter_map(Self::from_value)
            .find(|set| set.name == name);

        if found.is_none() {
            warn!("Result set {} missing from response", name);
        }
        found
    }

    fn from_value(value: &'a Value) -> Option<Self> {
        Some(Self {
            name: value.get("name")?.as_str()?,
            headers: value.get("headers")?.as_array()?,
            rows: value.get("rowSet")?.as_array()?,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by header name
    pub fn column(&self, header: &str) -> Option<usize> {
        let index = self
            .headers
            .iter()
            .position(|h| h.as_str() == Some(header));

        if index.is_none() {
            warn!("Column {} missing from result set {}", header, self.name);
        }
        index
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'a>> + '_ {
        self.rows
            .iter()
            .filter_map(|row| row.as_array())
            .map(|cells| Row { cells })
    }

    pub fn first_row(&self) -> Option<Row<'a>> {
        self.rows().next()
    }
}

/// Positional cells of one result set row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.cells.get(index).filter(|v| !v.is_null())
    }

    pub fn str(&self, index: usize) -> Option<&'a str> {
        self.get(index)?.as_str()
    }

    /// Numeric cell; numeric strings are accepted as well
    pub fn f64(&self, index: usize) -> Option<f64> {
        let value = self.get(index)?;
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        if number.is_none() {
            warn!("Expected a number at column {}, found {}", index, value);
        }
        number.filter(|n| n.is_finite())
    }

    pub fn i64(&self, index: usize) -> Option<i64> {
        let value = self.get(index)?;
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }
}

fn extract_result_sets(data: &Value) -> Option<&Vec<Value>> {
    let sets = data.get("resultSets")?.as_array();
    if sets.is_none() {
        warn!("Response has no resultSets array");
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "resultSets": [
                {
                    "name": "OverallPlayerDashboard",
                    "headers": ["GROUP_SET", "PTS", "FGA"],
                    "rowSet": [["Overall", 27.5, "20"]]
                },
                {
                    "name": "LocationPlayerDashboard",
                    "headers": ["GROUP_SET"],
                    "rowSet": []
                }
            ]
        })
    }

    #[test]
    fn test_find_by_name_and_read_columns() {
        let data = sample();
        let set = ResultSet::find(&data, "OverallPlayerDashboard").unwrap();
        assert_eq!(set.len(), 1);

        let row = set.first_row().unwrap();
        assert_eq!(row.f64(set.column("PTS").unwrap()), Some(27.5));
        assert_eq!(row.f64(set.column("FGA").unwrap()), Some(20.0));
        assert_eq!(row.str(set.column("GROUP_SET").unwrap()), Some("Overall"));
    }

    #[test]
    fn test_missing_pieces_are_none() {
        let data = sample();
        assert!(ResultSet::find(&data, "Nope").is_none());
        assert!(ResultSet::find(&json!({"foo": 1}), "OverallPlayerDashboard").is_none());

        let set = ResultSet::find(&data, "OverallPlayerDashboard").unwrap();
        assert!(set.column("REB").is_none());
        assert!(set.first_row().unwrap().f64(0).is_none());

        let empty = ResultSet::find(&data, "LocationPlayerDashboard").unwrap();
        assert!(empty.is_empty());
        assert!(empty.first_row().is_none());
    }

    #[test]
    fn test_null_cells_are_absent() {
        let data = json!({
            "resultSets": [{"name": "S", "headers": ["A"], "rowSet": [[null]]}]
        });
        let set = ResultSet::find(&data, "S").unwrap();
        assert!(set.first_row().unwrap().get(0).is_none());
    }
}

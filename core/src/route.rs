//! URL paths a view layer navigates between.

use std::fmt;

use crate::types::EmployeeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: the employee table.
    List,
    /// `/create`: the new-employee form.
    Create,
    /// `/employee/{id}`: detail and edit form for one employee.
    Detail(EmployeeId),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::List,
            ["create"] => Route::Create,
            ["employee", id] => Route::Detail(parse_id(id)),
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/create".to_string(),
            Route::Detail(id) => format!("/employee/{id}"),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn selected_id(&self) -> Option<&EmployeeId> {
        match self {
            Route::Detail(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(segment: &str) -> EmployeeId {
    segment
        .parse::<u64>()
        .map(EmployeeId::Number)
        .unwrap_or_else(|_| EmployeeId::Text(segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::List);
        assert_eq!(Route::parse(""), Route::List);
        assert_eq!(Route::parse("/create/"), Route::Create);
        assert_eq!(Route::parse("/employee/12"), Route::Detail(EmployeeId::Number(12)));
        assert_eq!(
            Route::parse("/employee/emp-12?tab=addresses"),
            Route::Detail(EmployeeId::Text("emp-12".to_string()))
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/employee"), Route::NotFound);
        assert_eq!(Route::parse("/employee/1/edit"), Route::NotFound);
        assert_eq!(Route::parse("/settings"), Route::NotFound);
    }

    #[test]
    fn path_is_parseable() {
        for route in [
            Route::List,
            Route::Create,
            Route::Detail(EmployeeId::Number(3)),
            Route::Detail(EmployeeId::from("x9")),
            Route::Detail(EmployeeId::from("12")),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn numeric_segment_matches_text_id() {
        let route = Route::Detail(EmployeeId::from("12"));
        let parsed = Route::parse(&route.path());
        assert_eq!(parsed.selected_id(), Some(&EmployeeId::Number(12)));
        assert_eq!(parsed.selected_id(), Some(&EmployeeId::from("12")));
    }

    #[test]
    fn only_detail_carries_an_id() {
        assert_eq!(
            Route::parse("/employee/7").selected_id(),
            Some(&EmployeeId::Number(7))
        );
        assert_eq!(Route::List.selected_id(), None);
    }
}

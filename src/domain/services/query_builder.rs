use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Wire form, or `None` when the parameter must be left out.
    fn encoded(&self) -> Option<String> {
        match self {
            ParamValue::Scalar(value) if value.is_empty() => None,
            ParamValue::Scalar(value) => Some(value.clone()),
            ParamValue::List(values) => {
                let values: Vec<&str> = values
                    .iter()
                    .map(String::as_str)
                    .filter(|v| !v.is_empty())
                    .collect();
                if values.is_empty() {
                    None
                } else {
                    Some(values.join(","))
                }
            }
        }
    }
}

/// Ordered query parameters for one analytics call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, Option<ParamValue>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        self.params
            .push((name.into(), value.map(|v| ParamValue::Scalar(v.into()))));
        self
    }

    pub fn list(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.params.push((name.into(), Some(ParamValue::List(values))));
        self
    }

    /// Names that will actually be sent.
    pub fn names(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(_, value)| value.as_ref().and_then(ParamValue::encoded).is_some())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// URL-encoded query string without the leading `?`. Absent values,
    /// empty strings and empty lists are omitted; lists are comma-joined.
    pub fn build(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.params {
            if let Some(encoded) = value.as_ref().and_then(ParamValue::encoded) {
                serializer.append_pair(name, &encoded);
            }
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_absent_and_empty_values() {
        let query = QueryParams::new()
            .scalar("date_from", None::<String>)
            .scalar("range", Some(""))
            .list("sex", Vec::new())
            .list("education", vec![String::new()])
            .scalar("date_to", Some("2026-03-31"));

        assert_eq!(query.build(), "date_to=2026-03-31");
        assert_eq!(query.names(), vec!["date_to"]);
    }

    #[test]
    fn joins_lists_with_commas_and_encodes() {
        let query = QueryParams::new()
            .list("education", vec!["High School".into(), "College".into()])
            .list("applicant_province", vec!["Batangas".into()]);

        assert_eq!(
            query.build(),
            "education=High+School%2CCollege&applicant_province=Batangas"
        );
    }

    #[test]
    fn empty_params_build_empty_string() {
        assert_eq!(QueryParams::new().build(), "");
    }
}

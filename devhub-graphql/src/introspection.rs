use crate::json_ext::Object;
use crate::json_ext::Value;
use crate::spec::schema::SCHEMA;

/// The introspection answer. The schema is static, so it is built once and cloned per request.
#[derive(Clone, Debug)]
pub(crate) struct Introspection {
    data: Object,
}

impl Introspection {
    pub(crate) fn new() -> Self {
        let schema = serde_json::to_value(&*SCHEMA)
            .expect("the static schema only holds strings, lists and maps; qed");
        let mut data = Object::new();
        data.insert("__schema", Value::from(schema));
        Self { data }
    }

    /// The `data` of an introspection response, whatever the introspection document asked for.
    pub(crate) fn execute(&self) -> Object {
        self.data.clone()
    }
}

impl Default for Introspection {
    fn default() -> Self {
        Self::new()
    }
}

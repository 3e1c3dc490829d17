use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub id: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct NodeTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct JobTag;

pub type NodeId = Id<NodeTag>;
pub type JobId = Id<JobTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_names_the_id_kind() {
        let node = NodeId::new("N1");
        let job = JobId::new("J7");

        assert_eq!(format!("{:?}", node), "NodeId: \"N1\"");
        assert_eq!(format!("{:?}", job), "JobId: \"J7\"");
        assert_eq!(node.to_string(), "N1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let node = NodeId::new("N2");
        assert_eq!(serde_json::to_string(&node).unwrap(), "\"N2\"");
    }
}

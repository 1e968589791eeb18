use crate::term::{Domain, GoTermId, TermGroup};
use crate::{DEFAULT_NUM_CHILDREN, DEFAULT_NUM_PARENTS};

/// The owned representation of a term inside the ontology arena
///
/// Public access goes through [`crate::GoTerm`].
#[derive(Debug, Clone)]
pub(crate) struct GoTermInternal {
    id: GoTermId,
    name: String,
    domain: Domain,
    definition: Option<String>,
    is_a: TermGroup,
    part_of: TermGroup,
    children: TermGroup,
    parts: TermGroup,
    ancestors: Option<TermGroup>,
    descendants: Option<TermGroup>,
}

impl GoTermInternal {
    pub fn new(id: GoTermId, name: String, domain: Domain) -> GoTermInternal {
        GoTermInternal {
            id,
            name,
            domain,
            definition: None,
            is_a: TermGroup::with_capacity(DEFAULT_NUM_PARENTS),
            part_of: TermGroup::default(),
            children: TermGroup::with_capacity(DEFAULT_NUM_CHILDREN),
            parts: TermGroup::default(),
            ancestors: None,
            descendants: None,
        }
    }

    pub fn id(&self) -> &GoTermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn definition_mut(&mut self) -> &mut Option<String> {
        &mut self.definition
    }

    pub fn is_a(&self) -> &TermGroup {
        &self.is_a
    }

    pub fn part_of(&self) -> &TermGroup {
        &self.part_of
    }

    pub fn children(&self) -> &TermGroup {
        &self.children
    }

    pub fn parts(&self) -> &TermGroup {
        &self.parts
    }

    pub fn ancestors(&self) -> Option<&TermGroup> {
        self.ancestors.as_ref()
    }

    pub fn descendants(&self) -> Option<&TermGroup> {
        self.descendants.as_ref()
    }

    pub fn add_parent<I: Into<GoTermId>>(&mut self, parent_id: I) -> bool {
        self.is_a.insert(parent_id)
    }

    pub fn add_whole<I: Into<GoTermId>>(&mut self, whole_id: I) -> bool {
        self.part_of.insert(whole_id)
    }

    pub fn add_child<I: Into<GoTermId>>(&mut self, child_id: I) -> bool {
        self.children.insert(child_id)
    }

    pub fn add_part<I: Into<GoTermId>>(&mut self, part_id: I) -> bool {
        self.parts.insert(part_id)
    }

    pub fn set_closures(&mut self, ancestors: TermGroup, descendants: TermGroup) {
        self.ancestors = Some(ancestors);
        self.descendants = Some(descendants);
    }
}

impl PartialEq for GoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GoTermInternal {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn equality_by_id_only() {
        let a = GoTermInternal::new(1u32.into(), "foo".into(), Domain::BiologicalProcess);
        let b = GoTermInternal::new(1u32.into(), "bar".into(), Domain::CellularComponent);
        let c = GoTermInternal::new(2u32.into(), "foo".into(), Domain::BiologicalProcess);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn closures_start_unset() {
        let mut term = GoTermInternal::new(1u32.into(), "foo".into(), Domain::BiologicalProcess);
        assert!(term.ancestors().is_none());
        assert!(term.descendants().is_none());

        term.set_closures(TermGroup::new(), TermGroup::new());
        assert!(term.ancestors().is_some());
        assert!(term.descendants().is_some());
    }
}

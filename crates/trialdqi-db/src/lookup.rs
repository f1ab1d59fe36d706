//! Trait for entity lookup by id.
//!
//! Alert subjects are weak references; every call site resolves them through
//! [`EntityLookup::resolve`] instead of matching on the tag itself.

use trialdqi_common::{EntityRef, Patient, Site, Study};

/// An entity found by resolving an [`EntityRef`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedEntity<'a> {
    Study(&'a Study),
    Site(&'a Site),
    Patient(&'a Patient),
}

/// Lookup of studies, sites and patients by id.
///
/// Every method returns `None` when the id is unknown.
pub trait EntityLookup: Send + Sync {
    fn study(&self, id: &str) -> Option<&Study>;

    fn site(&self, id: &str) -> Option<&Site>;

    fn patient(&self, id: &str) -> Option<&Patient>;

    /// Resolve a weak reference against the entity type it names.
    fn resolve(&self, reference: &EntityRef) -> Option<ResolvedEntity<'_>> {
        match reference {
            EntityRef::Study(id)   => self.study(id).map(ResolvedEntity::Study),
            EntityRef::Site(id)    => self.site(id).map(ResolvedEntity::Site),
            EntityRef::Patient(id) => self.patient(id).map(ResolvedEntity::Patient),
        }
    }

    /// Owning site of a patient, if both exist.
    fn site_of_patient(&self, patient_id: &str) -> Option<(&Patient, &Site)> {
        let patient = self.patient(patient_id)?;
        let site = self.site(&patient.site_id)?;
        Some((patient, site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataStore;

    #[test]
    fn test_resolve_by_type() {
        let store = DataStore::seeded();

        let site = store.resolve(&EntityRef::Site("SITE-001".into()));
        assert!(matches!(site, Some(ResolvedEntity::Site(s)) if s.country == "United States"));

        let patient = store.resolve(&EntityRef::Patient("PAT-001-001".into()));
        assert!(matches!(patient, Some(ResolvedEntity::Patient(p)) if p.site_id == "SITE-001"));

        let study = store.resolve(&EntityRef::Study("CARD-2024-002".into()));
        assert!(matches!(study, Some(ResolvedEntity::Study(_))));
    }

    #[test]
    fn test_resolve_respects_type_tag() {
        let store = DataStore::seeded();
        // A site id tagged as a patient does not resolve.
        assert!(store.resolve(&EntityRef::Patient("SITE-001".into())).is_none());
        assert!(store.resolve(&EntityRef::Study("STUDY".into())).is_none());
    }

    #[test]
    fn test_site_of_patient() {
        let store = DataStore::seeded();
        let (patient, site) = store.site_of_patient("PAT-004-001").unwrap();
        assert_eq!(patient.dqi, 68);
        assert_eq!(site.country, "France");
        assert!(store.site_of_patient("PAT-999").is_none());
    }
}

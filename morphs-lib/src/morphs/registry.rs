use super::builtin::TEXT_MORPH;
use super::{BUILTIN_MORPHS, Morph};
use crate::values::SemanticType;
use compact_str::CompactString;
use indexmap::IndexMap;
use std::sync::Arc;

const LOG_TARGET: &str = "  registry";

/// Where a resolved morph came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// The caller named the morph for this call
    Explicit,

    /// The configuration maps the attribute to the morph
    FieldRenderer,

    /// The morph is the default for the semantic type
    TypeDefault,

    /// Nothing else applied, so the text morph was used
    Fallback,
}

/// The outcome of resolving a morph.
#[derive(Debug, Clone)]
pub struct Resolution {
    morph: Arc<dyn Morph>,
    source: ResolutionSource,
}

impl Resolution {
    fn new(morph: &Arc<dyn Morph>, source: ResolutionSource) -> Self {
        Self {
            morph: Arc::clone(morph),
            source,
        }
    }

    #[must_use]
    pub fn morph(&self) -> &dyn Morph {
        self.morph.as_ref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.morph.name()
    }

    #[must_use]
    pub const fn source(&self) -> ResolutionSource {
        self.source
    }
}

/// Named morphs plus per-field overrides.
#[derive(Debug, Clone)]
pub struct MorphRegistry {
    morphs: IndexMap<CompactString, Arc<dyn Morph>>,
    field_renderers: IndexMap<CompactString, CompactString>,
    fallback: Arc<dyn Morph>,
}

impl MorphRegistry {
    /// A registry holding the built-in morphs and the given per-field overrides.
    ///
    /// Field names are matched without regard to case.
    #[must_use]
    pub fn with_defaults(field_renderers: &IndexMap<CompactString, CompactString>) -> Self {
        let morphs: IndexMap<CompactString, Arc<dyn Morph>> = BUILTIN_MORPHS
            .iter()
            .map(|m| (CompactString::from(m.name), Arc::new(*m) as Arc<dyn Morph>))
            .collect();

        Self {
            morphs,
            field_renderers: field_renderers
                .iter()
                .map(|(field, name)| (CompactString::from(field.to_lowercase()), CompactString::from(name.trim())))
                .collect(),
            fallback: Arc::new(TEXT_MORPH),
        }
    }

    /// Add a morph, replacing and returning any morph registered under the same name.
    pub fn register(&mut self, morph: Arc<dyn Morph>) -> Option<Arc<dyn Morph>> {
        let name = CompactString::from(morph.name());
        log::debug!(target: LOG_TARGET, "Registering morph '{name}'");
        self.morphs.insert(name, morph)
    }

    /// Route an attribute to a named morph.
    pub fn set_field_renderer(&mut self, field: &str, morph_name: &str) {
        let _ = self
            .field_renderers
            .insert(CompactString::from(field.to_lowercase()), CompactString::from(morph_name.trim()));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Morph>> {
        self.morphs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.morphs.keys().map(CompactString::as_str)
    }

    /// Pick the morph for a value.
    ///
    /// Precedence: `explicit` override, configured field renderer, the type's default,
    /// then the text morph. Names that are not registered are logged and skipped.
    #[must_use]
    pub fn resolve(&self, semantic_type: SemanticType, field: Option<&str>, explicit: Option<&str>) -> Resolution {
        if let Some(name) = explicit {
            if let Some(morph) = self.morphs.get(name.trim()) {
                return Resolution::new(morph, ResolutionSource::Explicit);
            }
            log::warn!(target: LOG_TARGET, "Unknown renderer '{name}' requested, ignoring");
        }

        if let Some(field) = field
            && let Some(name) = self.field_renderers.get(field.to_lowercase().as_str())
        {
            if let Some(morph) = self.morphs.get(name) {
                return Resolution::new(morph, ResolutionSource::FieldRenderer);
            }
            log::warn!(target: LOG_TARGET, "Unknown renderer '{name}' configured for field '{field}', ignoring");
        }

        if let Some(morph) = self.morphs.get(semantic_type.name()) {
            return Resolution::new(morph, ResolutionSource::TypeDefault);
        }

        Resolution::new(&self.fallback, ResolutionSource::Fallback)
    }
}

impl Default for MorphRegistry {
    fn default() -> Self {
        Self::with_defaults(&IndexMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::morphs::MorphContext;
    use crate::values::RawValue;
    use crate::visual::Node;

    #[derive(Debug)]
    struct Shout;

    impl Morph for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn render(&self, value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
            Ok(Some(Node::text(value.to_display_string().to_uppercase())))
        }
    }

    fn overrides() -> IndexMap<CompactString, CompactString> {
        let mut map = IndexMap::new();
        let _ = map.insert("Price".into(), "bar".into());
        let _ = map.insert("legacy".into(), "does-not-exist".into());
        map
    }

    #[test]
    fn test_type_default() {
        let registry = MorphRegistry::default();
        let resolution = registry.resolve(SemanticType::Rating, None, None);
        assert_eq!(resolution.name(), "rating");
        assert_eq!(resolution.source(), ResolutionSource::TypeDefault);
    }

    #[test]
    fn test_field_renderer_beats_type_default() {
        let registry = MorphRegistry::with_defaults(&overrides());
        let resolution = registry.resolve(SemanticType::Currency, Some("PRICE"), None);
        assert_eq!(resolution.name(), "bar");
        assert_eq!(resolution.source(), ResolutionSource::FieldRenderer);
    }

    #[test]
    fn test_explicit_beats_field_renderer() {
        let registry = MorphRegistry::with_defaults(&overrides());
        let resolution = registry.resolve(SemanticType::Currency, Some("price"), Some("number"));
        assert_eq!(resolution.name(), "number");
        assert_eq!(resolution.source(), ResolutionSource::Explicit);
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let registry = MorphRegistry::with_defaults(&overrides());
        let resolution = registry.resolve(SemanticType::Tag, Some("legacy"), Some("nope"));
        assert_eq!(resolution.name(), "tag");
        assert_eq!(resolution.source(), ResolutionSource::TypeDefault);
    }

    #[test]
    fn test_register_custom_morph() {
        let mut registry = MorphRegistry::default();
        assert!(registry.register(Arc::new(Shout)).is_none());
        registry.set_field_renderer("Motto", "shout");
        let resolution = registry.resolve(SemanticType::Text, Some("motto"), None);
        assert_eq!(resolution.name(), "shout");
        assert!(registry.names().any(|n| n == "shout"));
    }

    #[test]
    fn test_register_replaces_type_default() {
        #[derive(Debug)]
        struct Plain;

        impl Morph for Plain {
            fn name(&self) -> &str {
                "tag"
            }

            fn render(&self, _value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
                Ok(None)
            }
        }

        let mut registry = MorphRegistry::default();
        let replaced = registry.register(Arc::new(Plain));
        assert_eq!(replaced.map(|m| m.name().to_string()), Some("tag".to_string()));
        assert_eq!(registry.resolve(SemanticType::Tag, None, None).source(), ResolutionSource::TypeDefault);
    }

    #[test]
    fn test_fallback_when_type_default_missing() {
        let mut registry = MorphRegistry::default();
        let _ = registry.morphs.shift_remove("radar");
        let resolution = registry.resolve(SemanticType::Radar, None, None);
        assert_eq!(resolution.name(), "text");
        assert_eq!(resolution.source(), ResolutionSource::Fallback);
    }
}

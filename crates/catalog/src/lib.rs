#![deny(unsafe_code)]
//! Built-in shader catalog for shaderfolio.
//!
//! One module per effect, each exposing `definition()`. The assembled
//! [`Catalog`] is process-wide, initialized once, and never mutated;
//! sources are embedded here rather than fetched, so the portfolio works
//! without any network access. Entry order is display order, and the first
//! entry (Gradient Wave) is the featured hero shader by catalog policy.

pub mod gradient_wave;
pub mod julia;
pub mod noise_flow;

use std::sync::OnceLock;

use shaderfolio_core::Catalog;

/// The built-in catalog. Initialized on first call; later calls return the
/// same instance.
pub fn builtin() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        Catalog::new(vec![
            gradient_wave::definition(),
            julia::definition(),
            noise_flow::definition(),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_entries() {
        assert_eq!(builtin().len(), 3);
    }

    #[test]
    fn builtin_returns_the_same_instance() {
        let a: *const Catalog = builtin();
        let b: *const Catalog = builtin();
        assert_eq!(a, b, "catalog must be initialized exactly once");
    }

    #[test]
    fn featured_entry_is_gradient_wave() {
        let featured = builtin().featured().expect("catalog is not empty");
        assert_eq!(featured.id, "gradient-wave");
    }

    #[test]
    fn every_entry_is_reachable_by_lookup() {
        let catalog = builtin();
        for def in catalog.entries() {
            let found = catalog
                .lookup(&def.id)
                .unwrap_or_else(|| panic!("lookup failed for '{}'", def.id));
            assert_eq!(found.id, def.id);
        }
    }

    #[test]
    fn lookup_unknown_id_is_none() {
        assert!(builtin().lookup("plasma").is_none());
    }

    #[test]
    fn every_entry_declares_the_per_frame_uniforms() {
        for def in builtin().entries() {
            assert!(
                def.declares_uniform("u_time"),
                "'{}' must declare u_time",
                def.id
            );
            assert!(
                def.declares_uniform("u_resolution"),
                "'{}' must declare u_resolution",
                def.id
            );
        }
    }

    #[test]
    fn every_source_has_a_main_function() {
        for def in builtin().entries() {
            assert!(
                def.fragment_source.contains("void main()"),
                "'{}' source has no main",
                def.id
            );
        }
    }

    #[test]
    fn every_control_range_is_well_formed() {
        for def in builtin().entries() {
            for control in &def.controls {
                assert!(
                    control.min < control.max,
                    "'{}/{}': min must be below max",
                    def.id,
                    control.name
                );
                assert!(
                    control.step > 0.0,
                    "'{}/{}': step must be positive",
                    def.id,
                    control.name
                );
                assert!(
                    (control.min..=control.max).contains(&control.default),
                    "'{}/{}': default outside range",
                    def.id,
                    control.name
                );
            }
        }
    }

    #[test]
    fn definitions_serialize_with_sources_intact() {
        for def in builtin().entries() {
            let json = serde_json::to_value(def)
                .unwrap_or_else(|e| panic!("'{}' failed to serialize: {e}", def.id));
            assert_eq!(json["id"], def.id.as_str());
            assert!(
                json["fragment_source"]
                    .as_str()
                    .is_some_and(|s| s.contains("void main()")),
                "'{}' serialized without its source",
                def.id
            );
        }
    }

    #[test]
    fn controls_binding_uniforms_also_declare_a_kind() {
        for def in builtin().entries() {
            for control in &def.controls {
                if control.uniform.is_some() {
                    assert!(
                        control.uniform_kind.is_some(),
                        "'{}/{}': bound uniform needs a kind",
                        def.id,
                        control.name
                    );
                }
            }
        }
    }
}

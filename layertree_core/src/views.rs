// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only queries shared by downstream generators.
//!
//! Everything here is a method on [`LayerTree`] and borrows the tree; nothing
//! is cached. Traversal itself ([`LayerTree::flatten`],
//! [`LayerTree::children`], [`LayerTree::parent`]) lives with the tree.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::TreeConfig;
use crate::layer::{LayerId, LayerRole, LayerTree};
use crate::style::Style;

/// A style on a specific layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleRef<'a> {
    /// The owning layer.
    pub layer: LayerId,
    /// The style.
    pub style: &'a Style,
}

impl LayerTree {
    /// Returns whether the layer has the [`LayerRole::Data`] role.
    #[must_use]
    pub fn is_data_layer(&self, id: LayerId) -> bool {
        self.role(id) == LayerRole::Data
    }

    /// Returns whether the layer has the [`LayerRole::Group`] role.
    #[must_use]
    pub fn is_group_layer(&self, id: LayerId) -> bool {
        self.role(id) == LayerRole::Group
    }

    /// Returns whether the layer has the [`LayerRole::Top`] role.
    #[must_use]
    pub fn is_top_layer(&self, id: LayerId) -> bool {
        self.role(id) == LayerRole::Top
    }

    /// Returns the immediate parent of `node`, provided `node` lies strictly
    /// inside the subtree rooted at `root`.
    ///
    /// Returns `None` when `node == root` or when `node` is outside that
    /// subtree.
    #[must_use]
    pub fn find_parent(&self, node: LayerId, root: LayerId) -> Option<LayerId> {
        self.validate(root);
        let parent = self.parent(node)?;
        let mut cur = parent;
        loop {
            if cur == root {
                return Some(parent);
            }
            cur = self.parent(cur)?;
        }
    }

    /// Returns every data layer in pre-order.
    pub fn data_layers(&self) -> impl Iterator<Item = LayerId> + Clone + '_ {
        self.flatten().filter(|&id| self.is_data_layer(id))
    }

    /// Returns visible layers of any role that have at least one style with
    /// a legend asset, in pre-order.
    pub fn all_with_legend_asset(&self) -> impl Iterator<Item = LayerId> + Clone + '_ {
        self.flatten().filter(|&id| {
            let attrs = self.attributes(id);
            attrs.is_visible() && attrs.styles.iter().any(Style::has_legend)
        })
    }

    /// Returns the styles a legend generator has to render: every style
    /// without a legend asset on a visible layer.
    ///
    /// Hidden layers contribute nothing themselves, but their descendants are
    /// still visited.
    #[must_use]
    pub fn legend_references_missing_asset(&self) -> Vec<StyleRef<'_>> {
        self.flatten()
            .filter(|&id| self.attributes(id).is_visible())
            .flat_map(move |id| {
                self.attributes(id)
                    .styles
                    .iter()
                    .filter(|s| !s.has_legend())
                    .map(move |style| StyleRef { layer: id, style })
            })
            .collect()
    }

    /// Maps each group layer's name to the names of its direct data-layer
    /// children, in child order.
    ///
    /// Nested groups are not expanded; unnamed layers are skipped.
    #[must_use]
    pub fn group_to_data_leaf_names(&self) -> BTreeMap<String, Vec<String>> {
        let mut table = BTreeMap::new();
        for group in self.flatten().filter(|&id| self.is_group_layer(id)) {
            let Some(name) = self.name(group) else {
                continue;
            };
            let leaves = self
                .children(group)
                .filter(|&c| self.is_data_layer(c))
                .filter_map(|c| self.name(c).map(String::from))
                .collect();
            table.insert(String::from(name), leaves);
        }
        table
    }

    /// Returns, for each child layer, the names of its styles that its
    /// immediate parent also carries, in the child's style order.
    ///
    /// Every parent/child edge is compared on its own, so a grandchild is
    /// compared with its parent only, never with the grandparent. Children
    /// without a collision are absent from the map. Keys iterate in
    /// pre-order.
    #[must_use]
    pub fn style_name_collisions(&self) -> BTreeMap<LayerId, Vec<String>> {
        let mut out = BTreeMap::new();
        for id in self.flatten() {
            let parent = self.attributes(id);
            for child in self.children(id) {
                let shared: Vec<String> = self
                    .attributes(child)
                    .styles
                    .iter()
                    .filter(|s| parent.style(&s.name).is_some())
                    .map(|s| s.name.clone())
                    .collect();
                if !shared.is_empty() {
                    out.insert(child, shared);
                }
            }
        }
        out
    }

    /// Returns the child styles whose legend references must be rewritten to
    /// the parent's, because a proxy expands group requests into data-layer
    /// requests.
    ///
    /// Empty unless both group rewriting and the child style-name check are
    /// enabled in `config`; otherwise collisions are validation errors or
    /// ignored.
    #[must_use]
    pub fn legend_reference_cleanup(&self, config: &TreeConfig) -> Vec<StyleRef<'_>> {
        if !config.collisions_need_cleanup() {
            return Vec::new();
        }
        let mut out = Vec::new();
        for (child, names) in self.style_name_collisions() {
            let attrs = self.attributes(child);
            out.extend(
                names
                    .iter()
                    .filter_map(|n| attrs.style(n))
                    .map(|style| StyleRef {
                        layer: child,
                        style,
                    }),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::bbox::Crs;
    use crate::spec::{LayerAttributes, LayerSpec};
    use crate::style::Legend;

    use super::*;

    fn with_styles(name: &str, styles: &[&str]) -> LayerAttributes {
        let mut attrs = LayerAttributes::named(name);
        attrs.styles = styles.iter().map(|s| Style::named(*s)).collect();
        attrs
    }

    fn tree(spec: LayerSpec) -> LayerTree {
        LayerTree::from_spec(spec, Crs::system_default())
    }

    fn legend() -> Legend {
        Legend {
            width: 20,
            height: 20,
            format: "image/png".into(),
            blob_key: "legend/x.png".into(),
        }
    }

    #[test]
    fn routing_table_lists_direct_data_children() {
        // top -> G -> [D1, D2, G2 -> [D3]]
        let t = tree(LayerSpec::group(
            LayerAttributes::named("top"),
            vec![LayerSpec::group(
                LayerAttributes::named("G"),
                vec![
                    LayerSpec::leaf(LayerAttributes::named("D1")),
                    LayerSpec::leaf(LayerAttributes::named("D2")),
                    LayerSpec::group(
                        LayerAttributes::named("G2"),
                        vec![LayerSpec::leaf(LayerAttributes::named("D3"))],
                    ),
                ],
            )],
        ));
        let table = t.group_to_data_leaf_names();
        assert_eq!(table["G"], vec!["D1", "D2"]);
        assert_eq!(table["G2"], vec!["D3"]);
        assert!(!table.contains_key("top"), "top is not a group layer");
    }

    #[test]
    fn role_predicates() {
        let t = tree(LayerSpec::group(
            LayerAttributes::named("top"),
            vec![LayerSpec::group(
                LayerAttributes::named("g"),
                vec![LayerSpec::leaf(LayerAttributes::named("d"))],
            )],
        ));
        let g = t.find_by_name("g").unwrap();
        let d = t.find_by_name("d").unwrap();
        assert!(t.is_top_layer(t.root()));
        assert!(t.is_group_layer(g));
        assert!(t.is_data_layer(d));
        assert!(!t.is_data_layer(g));
        assert_eq!(t.data_layers().collect::<Vec<_>>(), vec![d]);
    }

    #[test]
    fn find_parent_within_subtree() {
        // top -> [a -> [a1], b]
        let t = tree(LayerSpec::group(
            LayerAttributes::named("top"),
            vec![
                LayerSpec::group(
                    LayerAttributes::named("a"),
                    vec![LayerSpec::leaf(LayerAttributes::named("a1"))],
                ),
                LayerSpec::leaf(LayerAttributes::named("b")),
            ],
        ));
        let top = t.root();
        let a = t.find_by_name("a").unwrap();
        let a1 = t.find_by_name("a1").unwrap();
        let b = t.find_by_name("b").unwrap();

        assert_eq!(t.find_parent(a1, top), Some(a));
        assert_eq!(t.find_parent(a1, a), Some(a));
        assert_eq!(t.find_parent(b, top), Some(top));
        assert_eq!(t.find_parent(top, top), None);
        assert_eq!(t.find_parent(a, a), None);
        assert_eq!(t.find_parent(b, a), None, "b is outside a's subtree");
    }

    #[test]
    fn legend_views() {
        let mut with_legend = with_styles("d1", &["x", "y"]);
        with_legend.styles[0].legend = Some(legend());
        let mut hidden = with_styles("g", &["hidden-style"]);
        hidden.visible = Some(false);
        let t = tree(LayerSpec::group(
            with_styles("top", &[]),
            vec![
                LayerSpec::leaf(with_legend),
                LayerSpec::group(hidden, vec![LayerSpec::leaf(with_styles("d2", &["z"]))]),
            ],
        ));

        let d1 = t.find_by_name("d1").unwrap();
        assert_eq!(t.all_with_legend_asset().collect::<Vec<_>>(), vec![d1]);

        let missing: Vec<_> = t
            .legend_references_missing_asset()
            .iter()
            .map(|r| (t.name(r.layer).unwrap(), r.style.name.as_str()))
            .collect();
        // The hidden group is skipped, its visible child is not.
        assert_eq!(missing, vec![("d1", "y"), ("d2", "z")]);
    }

    #[test]
    fn collisions_are_per_edge() {
        // P {s1, s2} -> Q {s2, s3} -> R {s3, s1}
        let t = tree(LayerSpec::group(
            with_styles("P", &["s1", "s2"]),
            vec![LayerSpec::group(
                with_styles("Q", &["s2", "s3"]),
                vec![LayerSpec::leaf(with_styles("R", &["s3", "s1"]))],
            )],
        ));
        let q = t.find_by_name("Q").unwrap();
        let r = t.find_by_name("R").unwrap();
        let collisions = t.style_name_collisions();
        assert_eq!(collisions.len(), 2);
        assert_eq!(collisions[&q], vec!["s2"]);
        // s1 is on P too, but R is only compared with Q.
        assert_eq!(collisions[&r], vec!["s3"]);
    }

    #[test]
    fn cleanup_only_in_rewrite_mode() {
        let t = tree(LayerSpec::group(
            with_styles("P", &["s1"]),
            vec![LayerSpec::leaf(with_styles("Q", &["s1", "s2"]))],
        ));
        assert!(t.legend_reference_cleanup(&TreeConfig::default()).is_empty());

        let rewrite = TreeConfig::default().with_rewrite_group_to_data_layers(true);
        let refs = t.legend_reference_cleanup(&rewrite);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].layer, t.find_by_name("Q").unwrap());
        assert_eq!(refs[0].style.name, "s1");

        let off = rewrite.with_validate_child_style_name_equal(false);
        assert!(t.legend_reference_cleanup(&off).is_empty());
    }
}

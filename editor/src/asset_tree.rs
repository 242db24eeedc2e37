//! Directory tree of registered assets for the content browser

use cobra_engine::asset::{AssetHandle, AssetRegistry};
use std::collections::BTreeMap;
use std::path::{Component, Path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Single path component, `"."` for the root
    pub name: String,
    pub parent: Option<usize>,
    pub children: BTreeMap<String, usize>,
    /// Asset whose path first created this node
    pub handle: Option<AssetHandle>,
}

impl TreeNode {
    fn new(name: impl Into<String>, parent: Option<usize>, handle: Option<AssetHandle>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: BTreeMap::new(),
            handle,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Flat arena of nodes; index 0 is the root
#[derive(Debug, Clone)]
pub struct AssetTree {
    nodes: Vec<TreeNode>,
}

impl Default for AssetTree {
    fn default() -> Self {
        Self {
            nodes: vec![TreeNode::new(".", None, None)],
        }
    }
}

impl AssetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: &AssetRegistry) -> Self {
        let mut tree = Self::new();
        tree.refresh(registry);
        tree
    }

    /// Rebuild the tree from the registry's file paths
    pub fn refresh(&mut self, registry: &AssetRegistry) {
        self.nodes.truncate(1);
        self.nodes[0].children.clear();

        for (handle, metadata) in registry {
            let mut current = 0;
            for name in path_components(&metadata.file_path) {
                current = match self.nodes[current].children.get(&name) {
                    Some(&index) => index,
                    None => {
                        let index = self.nodes.len();
                        self.nodes
                            .push(TreeNode::new(name.clone(), Some(current), Some(*handle)));
                        self.nodes[current].children.insert(name, index);
                        index
                    }
                };
            }
        }
    }

    /// Node index for a directory relative to the asset root
    pub fn find<P: AsRef<Path>>(&self, relative_dir: P) -> Option<usize> {
        let mut current = 0;
        for name in path_components(relative_dir.as_ref()) {
            current = *self.nodes[current].children.get(&name)?;
        }
        Some(current)
    }

    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// Children of a node in name order
    pub fn children(&self, index: usize) -> Vec<(&str, usize)> {
        self.nodes
            .get(index)
            .map(|node| {
                node.children
                    .iter()
                    .map(|(name, &child)| (name.as_str(), child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Relative path of a node, rebuilt from its ancestors
    pub fn path_of(&self, index: usize) -> Option<String> {
        let mut names = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            let node = self.nodes.get(i)?;
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            current = node.parent;
        }
        names.reverse();
        Some(names.join("/"))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

fn path_components(path: &Path) -> Vec<String> {
    let normalized = cobra_engine::utils::paths::normalize_path(path);
    normalized
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

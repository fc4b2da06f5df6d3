use atelier_types::ProjectFile;
use uuid::Uuid;

/// Node in the hierarchical file-tree view.
#[derive(Debug, Clone, PartialEq)]
pub enum FileNode {
    Folder {
        name: String,
        path: String,
        children: Vec<FileNode>,
    },
    File {
        name: String,
        path: String,
        file_id: Uuid,
    },
}

impl FileNode {
    pub fn name(&self) -> &str {
        match self {
            FileNode::Folder { name, .. } | FileNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            FileNode::Folder { path, .. } | FileNode::File { path, .. } => path,
        }
    }
}

/// Build the tree for a project's active files.
///
/// Inactive files are excluded. Files are ordered by full path before
/// insertion, so sibling order is deterministic for any input order of the
/// flat list: `a/b.py` sorts after `a.py` but before `ab.py`. Folders are
/// materialized on first use and deduplicated by their cumulative path.
pub fn build_file_tree(files: &[ProjectFile]) -> Vec<FileNode> {
    let mut active: Vec<&ProjectFile> = files.iter().filter(|f| f.is_active).collect();
    active.sort_by(|a, b| a.path.cmp(&b.path));

    let mut roots: Vec<FileNode> = Vec::new();
    for file in active {
        insert_file(&mut roots, file);
    }
    roots
}

fn insert_file(roots: &mut Vec<FileNode>, file: &ProjectFile) {
    let segments: Vec<&str> = file.path.split('/').filter(|s| !s.is_empty()).collect();
    let Some((leaf, folders)) = segments.split_last() else {
        return;
    };

    let mut current = roots;
    let mut cumulative = String::new();
    for folder in folders {
        if !cumulative.is_empty() {
            cumulative.push('/');
        }
        cumulative.push_str(folder);

        let position = current.iter().position(|node| {
            matches!(node, FileNode::Folder { path, .. } if path == &cumulative)
        });
        let index = match position {
            Some(index) => index,
            None => {
                current.push(FileNode::Folder {
                    name: folder.to_string(),
                    path: cumulative.clone(),
                    children: Vec::new(),
                });
                current.len() - 1
            }
        };
        current = match &mut current[index] {
            FileNode::Folder { children, .. } => children,
            // Position lookup only matches folders.
            FileNode::File { .. } => unreachable!(),
        };
    }

    current.push(FileNode::File {
        name: leaf.to_string(),
        path: file.path.clone(),
        file_id: file.id,
    });
}

//! Page tree
//!
//! A static description of the dashboard page. Graph nodes carry their
//! initial chart; everything else is plain content.

use serde::Serialize;

use crate::chart::ChartSpec;

/// One element of the page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Full-width header with a title and a lead line
    Banner { title: String, lead: String },
    /// Padded block
    Container { children: Vec<Node> },
    Row { children: Vec<Node> },
    /// Grid column; `width` is out of 12, `None` fills the row
    Col {
        width: Option<u8>,
        children: Vec<Node>,
    },
    Card {
        header: Option<String>,
        color: Option<String>,
        children: Vec<Node>,
    },
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Graph {
        id: String,
        figure: Option<ChartSpec>,
    },
    Dropdown {
        id: String,
        options: Vec<String>,
        value: String,
    },
    Tabs { tabs: Vec<Tab> },
    Rule,
    Break,
}

/// A labelled tab pane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub label: String,
    pub content: Node,
}

impl Node {
    pub fn row(children: Vec<Node>) -> Self {
        Node::Row { children }
    }

    pub fn col(width: u8, children: Vec<Node>) -> Self {
        Node::Col {
            width: Some(width),
            children,
        }
    }

    pub fn card(children: Vec<Node>) -> Self {
        Node::Card {
            header: None,
            color: None,
            children,
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Node::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph { text: text.into() }
    }

    pub fn graph(id: impl Into<String>, figure: Option<ChartSpec>) -> Self {
        Node::Graph {
            id: id.into(),
            figure,
        }
    }

    /// Direct children, for container-like nodes
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Container { children }
            | Node::Row { children }
            | Node::Col { children, .. }
            | Node::Card { children, .. } => children.iter().collect(),
            Node::Tabs { tabs } => tabs.iter().map(|tab| &tab.content).collect(),
            _ => Vec::new(),
        }
    }

    /// Depth-first search for a node matching `predicate`
    pub fn find<P>(&self, predicate: &P) -> Option<&Node>
    where
        P: Fn(&Node) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .into_iter()
            .find_map(|child| child.find(predicate))
    }

    /// Visit every node depth-first
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// The assembled dashboard page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub root: Node,
}

impl Page {
    /// Initial chart of the graph with id `id`
    pub fn graph(&self, id: &str) -> Option<&ChartSpec> {
        match self
            .root
            .find(&|node: &Node| matches!(node, Node::Graph { id: graph_id, .. } if graph_id == id))?
        {
            Node::Graph { figure, .. } => figure.as_ref(),
            _ => None,
        }
    }

    /// `(id, chart)` for every graph that has an initial chart, in page order
    pub fn graphs(&self) -> Vec<(&str, &ChartSpec)> {
        let mut graphs = Vec::new();
        self.root.walk(&mut |node| {
            if let Node::Graph {
                id,
                figure: Some(figure),
            } = node
            {
                graphs.push((id.as_str(), figure));
            }
        });
        graphs
    }

    /// Ids of every dropdown on the page
    pub fn inputs(&self) -> Vec<&str> {
        let mut inputs = Vec::new();
        self.root.walk(&mut |node| {
            if let Node::Dropdown { id, .. } = node {
                inputs.push(id.as_str());
            }
        });
        inputs
    }
}

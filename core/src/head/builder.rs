use super::header::Header;
use super::Head;

/// Accumulates header values into an immutable `Head`.
#[derive(Debug, Clone, Default)]
pub struct HeadBuilder {
    entries: Vec<(String, Vec<String>)>,
}

impl HeadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn values_mut(&mut self, name: String) -> &mut Vec<String> {
        let index = match self.entries.iter().position(|(n, _)| *n == name) {
            Some(index) => index,
            None => {
                self.entries.push((name, Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Appends `values` to `name`. Adding no values leaves the builder
    /// unchanged.
    pub fn add<I>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let mut values = values.into_iter().map(|v| v.to_string()).peekable();
        if values.peek().is_some() {
            self.values_mut(name.into()).extend(values);
        }
        self
    }

    /// Appends `values` to `header`'s name, each written in its wire form.
    pub fn add_header<V, I>(&mut self, header: &Header<V>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
    {
        let formatted: Vec<String> = values.into_iter().map(|v| header.format(&v)).collect();
        self.add(header.name(), formatted)
    }

    /// Appends every entry of `head`, keeping its order.
    pub fn merge(&mut self, head: &Head) -> &mut Self {
        for (name, values) in head.iter() {
            self.add(name, values);
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.entries.retain(|(n, _)| n != name);
        self
    }

    /// Snapshots the current entries; the builder stays usable.
    pub fn build(&self) -> Head {
        Head::from_entries(self.entries.clone())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    request: TestRequest,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, request: TestRequest) -> Self {
        Self { name, group, request }
    }

    pub fn small(name: &'static str, request: TestRequest) -> Self {
        Self::new(name, TestGroup::Small, request)
    }

    pub fn normal(name: &'static str, request: TestRequest) -> Self {
        Self::new(name, TestGroup::Normal, request)
    }

    pub fn large(name: &'static str, request: TestRequest) -> Self {
        Self::new(name, TestGroup::Large, request)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn request(&self) -> &TestRequest {
        &self.request
    }

    /// How many routes the router under test holds.
    pub fn route_count(&self) -> usize {
        self.group.route_count()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestRequest {
    method: &'static str,
    uri: &'static str,
}

impl TestRequest {
    pub const fn new(method: &'static str, uri: &'static str) -> Self {
        Self { method, uri }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn uri(&self) -> &'static str {
        self.uri
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

impl TestGroup {
    pub fn route_count(self) -> usize {
        match self {
            TestGroup::Small => 8,
            TestGroup::Normal => 64,
            TestGroup::Large => 512,
        }
    }
}

/// Route patterns for a table of `count` routes.
///
/// Every pattern has the shape `/resource{i}/:id/items/:item`, so the last one
/// is only reached after scanning the whole table.
pub fn route_patterns(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("/resource{i}/:id/items/:item")).collect()
}

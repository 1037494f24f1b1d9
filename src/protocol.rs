use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Path prefix for legacy REST-dialect methods.
pub const METHOD_PATH_PREFIX: &str = "method/";

/// Parameter key the dispatcher always forces.
pub const FORMAT_PARAM: &str = "format";
/// Forced response format: structured JSON.
pub const JSON_FORMAT: &str = "json";

/// Method name for the single-query form.
pub const FQL_QUERY_METHOD: &str = "fql.query";
/// Method name for the batched multi-query form.
pub const FQL_MULTIQUERY_METHOD: &str = "fql.multiquery";
/// Administrative method updating app-level configuration.
pub const SET_APP_PROPERTIES_METHOD: &str = "admin.setAppProperties";

/// Parameter key carrying a single query text.
pub const QUERY_PARAM: &str = "query";
/// Parameter key carrying the JSON-encoded batch of named queries.
pub const QUERIES_PARAM: &str = "queries";
/// Parameter key carrying the JSON-encoded app properties.
pub const PROPERTIES_PARAM: &str = "properties";

/// Free-form string-keyed parameters, one map per invocation.
pub type Params = Map<String, Value>;

/// Remote methods known to be side-effect-free lookups, eligible for
/// read-replica routing. Fixed at startup; matching is exact.
pub const READ_ONLY_METHODS: &[&str] = &[
    "admin.getallocation",
    "admin.getappproperties",
    "admin.getbannedusers",
    "admin.getlivestreamvialink",
    "admin.getmetrics",
    "admin.getrestrictioninfo",
    "application.getpublicinfo",
    "auth.getapppublickey",
    "auth.getsession",
    "auth.getsignedpublicsessiondata",
    "comments.get",
    "connect.getunconnectedfriendscount",
    "dashboard.getactivity",
    "dashboard.getcount",
    "dashboard.getglobalnews",
    "dashboard.getnews",
    "dashboard.multigetcount",
    "dashboard.multigetnews",
    "data.getcookies",
    "events.get",
    "events.getmembers",
    "fbml.getcustomtags",
    "feed.getappfriendstories",
    "feed.getregisteredtemplatebundlebyid",
    "feed.getregisteredtemplatebundles",
    "fql.multiquery",
    "fql.query",
    "friends.arefriends",
    "friends.get",
    "friends.getappusers",
    "friends.getlists",
    "friends.getmutualfriends",
    "gifts.get",
    "groups.get",
    "groups.getmembers",
    "intl.gettranslations",
    "links.get",
    "notes.get",
    "notifications.get",
    "pages.getinfo",
    "pages.isadmin",
    "pages.isappadded",
    "pages.isfan",
    "permissions.checkavailableapiaccess",
    "permissions.checkgrantedapiaccess",
    "photos.get",
    "photos.getalbums",
    "photos.gettags",
    "profile.getinfo",
    "profile.getinfooptions",
    "stream.get",
    "stream.getcomments",
    "stream.getfilters",
    "users.getinfo",
    "users.getloggedinuser",
    "users.getstandardinfo",
    "users.hasapppermission",
    "users.isappuser",
    "users.isverified",
    "video.getuploadlimits",
];

/// Whether a method is a known read-only lookup.
pub fn is_read_only(method: &str) -> bool {
    READ_ONLY_METHODS.contains(&method)
}

/// Build the request path for a named method.
pub fn method_path(method: &str) -> String {
    format!("{}{}", METHOD_PATH_PREFIX, method)
}

/// Transport directives attached to every invocation.
///
/// `rest_api` and `read_only` are set by the dispatcher; `extra` carries
/// caller-supplied pass-through keys (e.g. `beta`) the transport may
/// recognize, forwarded verbatim and uninterpreted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportOptions {
    /// Route via the legacy RPC dialect rather than the graph convention.
    pub rest_api: bool,
    /// Routing hint: the method performs no writes.
    pub read_only: bool,
    /// Caller-supplied pass-through keys.
    pub extra: Params,
}

/// A parsed reply from the transport collaborator.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: Value,
    pub headers: HeaderMap,
}

impl Response {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

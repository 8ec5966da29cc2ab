//! Reconstructing a city and its unit preference from a `/city/<slug>` URL,
//! and building such URLs.

use percent_encoding::percent_decode_str;
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};
use tracing::{debug, trace};
use url::{Url, form_urlencoded};

use crate::{
    error::{Error, Result},
    model::{CityResolution, GeoPoint, Units},
    slug::{deslugify, slugify},
};

/// Path segment that precedes the slug on a city page.
pub const CITY_SEGMENT: &str = "city";

/// Slug written when a name has no characters that survive [`slugify`].
const FALLBACK_SLUG: &str = "city";

/// Base used to interpret path-only inputs such as `/city/paris?lat=..`.
const RELATIVE_BASE: &str = "http://localhost/";

/// Read access to a URL's query parameters.
pub trait QueryParams {
    /// Value of the first parameter named `key`, if any.
    fn get(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> QueryParams for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        HashMap::get(self, key).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl QueryParams for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        BTreeMap::get(self, key).map(|value| Cow::Borrowed(value.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> QueryParams for [(K, V)] {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(k, _)| AsRef::<str>::as_ref(k) == key)
            .map(|(_, value)| Cow::Borrowed(value.as_ref()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> QueryParams for [(K, V); N] {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        QueryParams::get(self.as_slice(), key)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> QueryParams for Vec<(K, V)> {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        QueryParams::get(self.as_slice(), key)
    }
}

impl QueryParams for Url {
    fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        self.query_pairs().find(|(k, _)| k == key).map(|(_, value)| value)
    }
}

/// Resolves the city and unit preference encoded in a city page URL.
///
/// `lat` and `lon` must parse to finite numbers within geographic range or
/// the city is `None`. The display name comes from `name`, falling back to a
/// title-cased rendering of the slug. A `name` is trimmed, and one that is
/// empty after trimming counts as absent. `u` is honoured only when it is
/// exactly `metric` or `imperial`.
pub fn parse_city_from_url<Q>(slug: &str, query: &Q) -> CityResolution
where
    Q: QueryParams + ?Sized,
{
    let city = resolve_point(slug, query);
    let units = resolve_units(query);

    match &city {
        Some(point) => trace!("Resolved city slug '{}' to {}", slug, point),
        None => debug!("City slug '{}' did not resolve to a location", slug),
    }

    CityResolution { city, units }
}

/// Splits a parsed URL into its decoded city slug, e.g. `"paris"` for
/// `https://host/city/paris?lat=..`.
pub fn city_slug(url: &Url) -> Result<String> {
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [.., CITY_SEGMENT, slug] => Ok(percent_decode_str(slug)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| slug.to_string())),
        _ => Err(Error::NotACityPath(url.to_string())),
    }
}

/// Parses an absolute URL or a path-with-query and resolves it.
pub fn resolve_city_url(input: &str) -> Result<CityResolution> {
    let url = parse_url(input)?;
    let slug = city_slug(&url)?;

    Ok(parse_city_from_url(&slug, &url))
}

/// Builds the page path for a city, e.g.
/// `/city/new-york?lat=40.7128&lon=-74.006&name=New+York&u=imperial`.
///
/// Feeding the result back through [`resolve_city_url`] yields the same point.
pub fn city_path(point: &GeoPoint, units: Option<Units>) -> String {
    let slug = slugify(&point.name);
    let slug = if slug.is_empty() { FALLBACK_SLUG } else { slug.as_str() };

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("lat", &point.lat.to_string())
        .append_pair("lon", &point.lon.to_string())
        .append_pair("name", &point.name);
    if let Some(units) = units {
        query.append_pair("u", units.as_str());
    }

    format!("/{CITY_SEGMENT}/{slug}?{}", query.finish())
}

/// Pins the units of an existing page URL, as the units toggle does.
///
/// The first `u` parameter is rewritten in place and any later ones are
/// dropped; without one, `u` is appended. Other parameters are kept in order.
pub fn set_units(url: &mut Url, units: Units) {
    let mut replaced = false;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(key, value)| {
            if key != "u" {
                return Some((key.into_owned(), value.into_owned()));
            }
            if replaced {
                return None;
            }
            replaced = true;
            Some((key.into_owned(), units.as_str().to_string()))
        })
        .collect();

    let mut query = url.query_pairs_mut();
    query.clear().extend_pairs(pairs);
    if !replaced {
        query.append_pair("u", units.as_str());
    }
}

fn parse_url(input: &str) -> Result<Url> {
    let invalid = |source: url::ParseError| Error::InvalidUrl { input: input.to_string(), source };

    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(input))
            .map_err(invalid),
        Err(err) => Err(invalid(err)),
    }
}

fn resolve_point<Q>(slug: &str, query: &Q) -> Option<GeoPoint>
where
    Q: QueryParams + ?Sized,
{
    let lat = parse_coordinate(query, "lat")?;
    let lon = parse_coordinate(query, "lon")?;

    let name = query
        .get("name")
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| deslugify(slug));

    let point = GeoPoint::new(lat, lon, name);
    if point.is_none() {
        debug!("Coordinates out of range: lat={}, lon={}", lat, lon);
    }
    point
}

fn parse_coordinate<Q>(query: &Q, key: &str) -> Option<f64>
where
    Q: QueryParams + ?Sized,
{
    let Some(raw) = query.get(key) else {
        debug!("Missing '{}' parameter", key);
        return None;
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!("Invalid '{}' parameter: {:?}", key, raw);
            None
        }
    }
}

fn resolve_units<Q>(query: &Q) -> Option<Units>
where
    Q: QueryParams + ?Sized,
{
    let raw = query.get("u")?;
    let units = Units::from_query(&raw);
    if units.is_none() {
        debug!("Ignoring unrecognised units parameter: {:?}", raw);
    }
    units
}

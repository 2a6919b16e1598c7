use crate::types::{CountryShare, Platform};
use serde::Serialize;

pub const IOS_COLOR: &str = "#1f77b4";
pub const ANDROID_COLOR: &str = "#2ca02c";

/// A plotly figure description: trace list plus layout. Built once at
/// startup from the dataset and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Trace {
    Choropleth(ChoroplethTrace),
    ScatterGeo(ScatterGeoTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub locations: Vec<String>,
    pub locationmode: &'static str,
    pub z: Vec<f64>,
    pub text: Vec<String>,
    pub colorscale: Vec<(f64, &'static str)>,
    pub showscale: bool,
    pub showlegend: bool,
    pub hoverinfo: &'static str,
    pub hovertext: Vec<String>,
}

/// Legend-only trace: one null point, so nothing is drawn on the map
/// but plotly still emits a legend entry. The choropleth trace itself
/// has no legend.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterGeoTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub lon: Vec<Option<f64>>,
    pub lat: Vec<Option<f64>>,
    pub mode: &'static str,
    pub marker: Marker,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: u32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub geo: Geo,
    pub margin: Margin,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub legend: Legend,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    pub showframe: bool,
    pub showcoastlines: bool,
    pub coastlinecolor: &'static str,
    pub showland: bool,
    pub landcolor: &'static str,
    pub showocean: bool,
    pub oceancolor: &'static str,
    pub showlakes: bool,
    pub showrivers: bool,
    pub showcountries: bool,
    pub countrycolor: &'static str,
    pub countrywidth: f64,
    pub projection: Projection,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub r: u32,
    pub t: u32,
    pub l: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: LegendTitle,
    pub orientation: &'static str,
    pub yanchor: &'static str,
    pub y: f64,
    pub xanchor: &'static str,
    pub x: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendTitle {
    pub text: &'static str,
}

/// Build the complete figure for a dataset. Pure and deterministic:
/// the same dataset always serializes to the same JSON.
pub fn build_figure(dataset: &[CountryShare], title: &str) -> Figure {
    let locations: Vec<String> = dataset.iter().map(|r| r.country.clone()).collect();
    let z: Vec<f64> = dataset.iter().map(|r| r.dominant.color_value()).collect();
    let hovertext: Vec<String> = dataset.iter().map(hover_text).collect();

    let choropleth = ChoroplethTrace {
        trace_type: "choropleth",
        text: locations.clone(),
        locations,
        locationmode: "country names",
        z,
        colorscale: vec![(0.0, ANDROID_COLOR), (1.0, IOS_COLOR)],
        showscale: false,
        showlegend: false,
        hoverinfo: "text",
        hovertext,
    };

    Figure {
        data: vec![
            Trace::Choropleth(choropleth),
            Trace::ScatterGeo(legend_entry(Platform::Ios.label(), IOS_COLOR)),
            Trace::ScatterGeo(legend_entry(Platform::Android.label(), ANDROID_COLOR)),
        ],
        layout: Layout {
            title: Title {
                text: title.to_string(),
            },
            geo: Geo {
                showframe: false,
                showcoastlines: true,
                coastlinecolor: "RebeccaPurple",
                showland: true,
                landcolor: "LightGrey",
                showocean: true,
                oceancolor: "LightBlue",
                showlakes: false,
                showrivers: false,
                showcountries: true,
                countrycolor: "white",
                countrywidth: 0.5,
                projection: Projection {
                    kind: "natural earth",
                },
            },
            margin: Margin {
                r: 0,
                t: 40,
                l: 0,
                b: 0,
            },
            paper_bgcolor: "rgba(0,0,0,0)",
            plot_bgcolor: "rgba(0,0,0,0)",
            legend: Legend {
                title: LegendTitle {
                    text: "Dominant Platform",
                },
                orientation: "h",
                yanchor: "bottom",
                y: 1.02,
                xanchor: "right",
                x: 1.0,
            },
        },
    }
}

fn legend_entry(name: &'static str, color: &'static str) -> ScatterGeoTrace {
    ScatterGeoTrace {
        trace_type: "scattergeo",
        lon: vec![None],
        lat: vec![None],
        mode: "markers",
        marker: Marker { size: 10, color },
        name,
    }
}

/// Hover label for one country, `<br>`-separated as plotly expects.
pub fn hover_text(row: &CountryShare) -> String {
    format!(
        "{}<br>iOS: {}%<br>Android: {}%",
        row.country,
        format_share(row.ios_share),
        format_share(row.android_share)
    )
}

/// Render a share without rounding. Integral floats keep a trailing
/// `.0` so `40` reads as `40.0`, matching the source data; missing
/// values print as `NaN`.
fn format_share(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.1}", v),
        Some(v) => format!("{}", v),
        None => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CountryShare, Platform};

    fn row(country: &str, ios: Option<f64>, android: Option<f64>) -> CountryShare {
        CountryShare {
            country: country.to_string(),
            ios_share: ios,
            android_share: android,
            dominant: Platform::dominant(ios),
        }
    }

    #[test]
    fn figure_always_has_three_traces() {
        let dataset = vec![row("France", Some(62.5), Some(37.5))];
        assert_eq!(build_figure(&dataset, "t").data.len(), 3);
        assert_eq!(build_figure(&[], "t").data.len(), 3);
    }

    #[test]
    fn empty_dataset_has_empty_map_data() {
        let figure = build_figure(&[], "t");
        match &figure.data[0] {
            Trace::Choropleth(c) => {
                assert!(c.locations.is_empty());
                assert!(c.z.is_empty());
                assert!(c.hovertext.is_empty());
            }
            _ => panic!("first trace must be the choropleth"),
        }
    }

    #[test]
    fn z_values_follow_dominance() {
        let dataset = vec![
            row("France", Some(62.5), Some(37.5)),
            row("Brazil", Some(40.0), Some(60.0)),
        ];
        let figure = build_figure(&dataset, "t");
        match &figure.data[0] {
            Trace::Choropleth(c) => assert_eq!(c.z, vec![1.0, 0.0]),
            _ => panic!("first trace must be the choropleth"),
        }
    }

    #[test]
    fn hover_text_matches_exactly() {
        assert_eq!(
            hover_text(&row("France", Some(62.5), Some(37.5))),
            "France<br>iOS: 62.5%<br>Android: 37.5%"
        );
        assert_eq!(
            hover_text(&row("Brazil", Some(40.0), Some(60.0))),
            "Brazil<br>iOS: 40.0%<br>Android: 60.0%"
        );
    }

    #[test]
    fn hover_text_shows_nan_for_missing() {
        assert_eq!(
            hover_text(&row("X", None, None)),
            "X<br>iOS: NaN%<br>Android: NaN%"
        );
    }

    #[test]
    fn hover_values_are_not_rounded() {
        assert_eq!(
            hover_text(&row("Y", Some(33.333), Some(66.667))),
            "Y<br>iOS: 33.333%<br>Android: 66.667%"
        );
    }

    #[test]
    fn legend_traces_are_fixed() {
        let figure = build_figure(&[], "t");
        match (&figure.data[1], &figure.data[2]) {
            (Trace::ScatterGeo(ios), Trace::ScatterGeo(android)) => {
                assert_eq!(ios.name, "iOS");
                assert_eq!(ios.marker.color, IOS_COLOR);
                assert_eq!(ios.lon, vec![None]);
                assert_eq!(android.name, "Android");
                assert_eq!(android.marker.color, ANDROID_COLOR);
            }
            _ => panic!("legend traces must be scattergeo"),
        }
    }

    #[test]
    fn build_is_idempotent() {
        let dataset = vec![
            row("France", Some(62.5), Some(37.5)),
            row("X", None, None),
        ];
        let a = serde_json::to_string(&build_figure(&dataset, "title")).unwrap();
        let b = serde_json::to_string(&build_figure(&dataset, "title")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serialized_shape_matches_plotly() {
        let dataset = vec![row("France", Some(62.5), Some(37.5))];
        let json = serde_json::to_value(build_figure(&dataset, "Map")).unwrap();

        assert_eq!(json["data"][0]["type"], "choropleth");
        assert_eq!(json["data"][0]["locationmode"], "country names");
        assert_eq!(json["data"][0]["locations"][0], "France");
        assert_eq!(json["data"][0]["z"][0], 1.0);
        assert_eq!(json["data"][0]["showscale"], false);
        assert_eq!(json["data"][0]["colorscale"][0][1], ANDROID_COLOR);
        assert_eq!(json["data"][0]["colorscale"][1][1], IOS_COLOR);
        assert_eq!(json["data"][1]["type"], "scattergeo");
        assert_eq!(json["data"][1]["lon"][0], serde_json::Value::Null);
        assert_eq!(json["layout"]["title"]["text"], "Map");
        assert_eq!(json["layout"]["geo"]["projection"]["type"], "natural earth");
        assert_eq!(json["layout"]["geo"]["showframe"], false);
        assert_eq!(json["layout"]["paper_bgcolor"], "rgba(0,0,0,0)");
        assert_eq!(json["layout"]["legend"]["orientation"], "h");
        assert_eq!(json["layout"]["legend"]["title"]["text"], "Dominant Platform");
        assert_eq!(json["layout"]["margin"]["t"], 40);
    }
}

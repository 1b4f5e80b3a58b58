use leaflet::LatLng;
use leptos::*;
use leptos_leaflet::{position, MapContainer, MapEvents, Marker, MouseEvents, Popup, Position, TileLayer};

use votemap_core::{
    entities::{
        geo::{MapPoint, MapPointError},
        vote::Vote,
    },
    ui::ScreenPoint,
};

const TILE_LAYER_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const DEFAULT_ZOOM: f64 = 13.0;

fn click_anchor(ev: &leaflet::MouseEvent) -> ScreenPoint {
    let original = ev.original_event();
    ScreenPoint::new(f64::from(original.client_x()), f64::from(original.client_y()))
}

// Leaflet does not wrap longitudes when the map has been panned
// across the antimeridian.
fn click_pos(ev: &leaflet::MouseEvent) -> Result<MapPoint, MapPointError> {
    let lat_lng = ev.lat_lng();
    MapPoint::try_from_unwrapped_lat_lng_deg(lat_lng.lat(), lat_lng.lng())
}

#[component]
pub fn Map(
    #[prop(into)] center: Signal<MapPoint>,
    #[prop(into)] votes: Signal<Vec<Vote>>,
    on_map_click: Callback<(MapPoint, ScreenPoint)>,
    on_marker_click: Callback<ScreenPoint>,
) -> impl IntoView {
    let events = MapEvents::new();
    let map = RwSignal::<Option<leaflet::Map>>::new(None);

    events.clone().mouse_click(move |ev| match click_pos(&ev) {
        Ok(pos) => on_map_click.call((pos, click_anchor(&ev))),
        Err(err) => log::warn!("Ignore map click: {err}"),
    });

    let marker_events = MouseEvents::new().on_click(move |ev| {
        on_marker_click.call(click_anchor(&ev));
    });

    // The container itself sets the initial view.
    Effect::new(move |initialized: Option<()>| {
        let (lat, lng) = center.get().to_lat_lng_deg();
        if initialized.is_none() {
            return;
        }
        let Some(map) = map.get_untracked() else {
            log::warn!("No leaflet map found");
            return;
        };
        let zoom = map.get_zoom();
        map.set_view(&LatLng::new(lat, lng), zoom);
    });

    let (lat, lng) = center.get_untracked().to_lat_lng_deg();
    let initial_center = Position::new(lat, lng);
    let center_position = Signal::derive(move || {
        let (lat, lng) = center.get().to_lat_lng_deg();
        Position::new(lat, lng)
    });

    view! {
      <MapContainer
        class="h-full"
        center=initial_center
        zoom=DEFAULT_ZOOM
        zoom_control=false
        map=map.write_only()
        set_view=true
        events
      >
        <TileLayer url=TILE_LAYER_URL attribution=MAP_ATTRIBUTION />
        <Marker position=center_position mouse_events=marker_events />
        <For
          each=move || votes.get()
          key=|vote| vote.id.clone()
          let:vote
        >
          {
            let (lat, lng) = vote.pos().to_lat_lng_deg();
            view! {
              <Marker position=position!(lat, lng)>
                <Popup>
                  <strong>{ vote.region().to_string() }</strong>
                  { vote.message.clone().map(|msg| view! { <p>{ msg }</p> }) }
                </Popup>
              </Marker>
            }
          }
        </For>
      </MapContainer>
    }
}

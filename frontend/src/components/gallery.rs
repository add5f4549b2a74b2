use log::debug;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

/// Items of a marquee track, doubled once so the CSS loop has no seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryTrack<T> {
    items: Vec<T>,
    originals: usize,
    cloned: bool,
}

impl<T: Clone> GalleryTrack<T> {
    pub fn new(items: Vec<T>) -> Self {
        let originals = items.len();
        Self {
            items,
            originals,
            cloned: false,
        }
    }

    /// Appends a copy of every item after the originals. Runs at most once
    /// per track; returns whether this call did the duplication.
    pub fn ensure_looped(&mut self) -> bool {
        if self.cloned {
            return false;
        }
        self.items.extend_from_within(..);
        self.cloned = true;
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_cloned(&self) -> bool {
        self.cloned
    }

    /// True for entries that only exist to close the loop.
    pub fn is_duplicate(&self, index: usize) -> bool {
        self.cloned && index >= self.originals
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    pub src: AttrValue,
    pub alt: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct GalleryProps {
    pub items: Vec<GalleryItem>,
}

#[function_component(Gallery)]
pub fn gallery(props: &GalleryProps) -> Html {
    let track = use_state(|| {
        let mut track = GalleryTrack::new(props.items.clone());
        if track.ensure_looped() {
            debug!("gallery track doubled to {} items", track.items().len());
        }
        track
    });

    html! {
        <div class="gallery">
            <div class="gallery-track" data-cloned={track.is_cloned().to_string()}>
                { for track.items().iter().enumerate().map(|(index, item)| {
                    let duplicate = track.is_duplicate(index);
                    html! {
                        <figure
                            key={index}
                            class="gallery-item"
                            aria-hidden={duplicate.then_some("true")}
                        >
                            <img src={item.src.clone()} alt={if duplicate { AttrValue::default() } else { item.alt.clone() }} loading="lazy" />
                        </figure>
                    }
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looping_doubles_the_sequence_in_order() {
        let mut track = GalleryTrack::new(vec!["a", "b", "c"]);
        assert!(track.ensure_looped());
        assert_eq!(track.items(), &["a", "b", "c", "a", "b", "c"]);
        assert!(!track.is_duplicate(2));
        assert!(track.is_duplicate(3));
    }

    #[test]
    fn second_call_does_not_double_again() {
        let mut track = GalleryTrack::new(vec![1, 2]);
        track.ensure_looped();
        assert!(!track.ensure_looped());
        assert_eq!(track.items().len(), 4);
        assert!(track.is_cloned());
    }

    #[test]
    fn empty_track_stays_empty() {
        let mut track: GalleryTrack<u8> = GalleryTrack::new(Vec::new());
        track.ensure_looped();
        assert!(track.items().is_empty());
    }
}

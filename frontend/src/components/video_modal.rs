use std::rc::Rc;

use log::{debug, info, warn};
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;
use yew_hooks::prelude::*;

use crate::dom;

pub const DEFAULT_VIDEO_TITLE: &str = "Video";
pub const DEFAULT_VIDEO_HREF: &str = "#";

pub fn preview_image_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// What a thumbnail asks the modal to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoRequest {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoModalState {
    open: bool,
    preview: Option<String>,
    label: String,
    link: String,
}

impl Default for VideoModalState {
    fn default() -> Self {
        Self {
            open: false,
            preview: None,
            label: DEFAULT_VIDEO_TITLE.to_string(),
            link: DEFAULT_VIDEO_HREF.to_string(),
        }
    }
}

impl VideoModalState {
    /// Opens the modal for `request`. Without a video id the previous preview
    /// image is left in place.
    pub fn open(&mut self, request: &VideoRequest) {
        if let Some(id) = request.video_id.as_deref().filter(|id| !id.is_empty()) {
            self.preview = Some(preview_image_url(id));
        }
        self.label = request
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_VIDEO_TITLE.to_string());
        self.link = request
            .href
            .clone()
            .filter(|href| !href.is_empty())
            .unwrap_or_else(|| DEFAULT_VIDEO_HREF.to_string());
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn preview_style(&self) -> Option<String> {
        self.preview
            .as_ref()
            .map(|url| format!("background-image: url('{}')", url))
    }
}

pub enum VideoModalAction {
    Open(VideoRequest),
    Close,
}

impl Reducible for VideoModalState {
    type Action = VideoModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            VideoModalAction::Open(request) => next.open(&request),
            VideoModalAction::Close => next.close(),
        }
        next.into()
    }
}

pub type VideoModalHandle = UseReducerHandle<VideoModalState>;

#[derive(Properties, PartialEq)]
pub struct VideoModalProviderProps {
    #[prop_or_default]
    pub children: Children,
}

/// Owns the single preview modal and hands its handle to every thumbnail.
#[function_component(VideoModalProvider)]
pub fn video_modal_provider(props: &VideoModalProviderProps) -> Html {
    let modal = use_reducer(VideoModalState::default);
    let modal_ref = use_node_ref();

    {
        let modal_ref = modal_ref.clone();
        use_effect_with_deps(
            move |open: &bool| {
                if modal_ref.get().is_none() {
                    warn!("video modal markup missing, skipping scroll lock");
                } else if *open || dom::body_scroll_locked() {
                    dom::set_body_scroll_locked(*open);
                }
                || ()
            },
            modal.is_open(),
        );
    }

    {
        let modal = modal.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                debug!("Escape pressed, closing video modal");
                modal.dispatch(VideoModalAction::Close);
            }
        });
    }

    let close = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.dispatch(VideoModalAction::Close))
    };

    html! {
        <ContextProvider<VideoModalHandle> context={modal.clone()}>
            { for props.children.iter() }
            <div
                ref={modal_ref}
                id="video-modal"
                class={classes!("video-modal", modal.is_open().then_some("is-open"))}
                aria-hidden={(!modal.is_open()).to_string()}
            >
                <div class="video-modal__backdrop" data-video-close="true" onclick={close.clone()}></div>
                <div class="video-modal__dialog" role="dialog" aria-modal="true">
                    <button
                        type="button"
                        class="video-modal__close"
                        data-video-close="true"
                        aria-label="Cerrar"
                        onclick={close}
                    >
                        {"×"}
                    </button>
                    <div
                        id="video-modal-preview"
                        class="video-modal__preview"
                        role="img"
                        aria-label={modal.label().to_string()}
                        style={modal.preview_style()}
                    ></div>
                    <a
                        id="video-modal-link"
                        class="video-modal__link"
                        href={modal.link().to_string()}
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        {"Ver en YouTube"}
                    </a>
                </div>
            </div>
        </ContextProvider<VideoModalHandle>>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoThumbProps {
    #[prop_or_default]
    pub video_id: Option<AttrValue>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub href: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(VideoThumb)]
pub fn video_thumb(props: &VideoThumbProps) -> Html {
    let modal = use_context::<VideoModalHandle>();

    let onclick = {
        let request = VideoRequest {
            video_id: props.video_id.as_ref().map(|v| v.to_string()),
            title: props.title.as_ref().map(|v| v.to_string()),
            href: props.href.as_ref().map(|v| v.to_string()),
        };
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            match &modal {
                Some(modal) => {
                    info!("opening video preview {:?}", request.video_id);
                    modal.dispatch(VideoModalAction::Open(request.clone()));
                }
                None => warn!("video thumbnail rendered outside VideoModalProvider"),
            }
        })
    };

    html! {
        <a
            class="video-thumb"
            href={props.href.clone()}
            data-video-id={props.video_id.clone()}
            data-video-title={props.title.clone()}
            onclick={onclick}
        >
            { for props.children.iter() }
        </a>
    }
}

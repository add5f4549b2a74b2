use yew::prelude::*;

use crate::components::accordion::{Accordion, FaqEntry};
use crate::components::anchor_nav::use_anchor_nav;
use crate::components::contact_form::{ContactForm, FieldKind, FieldSpec};
use crate::components::counter::Counter;
use crate::components::demo::{DemoCycler, DemoStep};
use crate::components::gallery::{Gallery, GalleryItem};
use crate::components::nav::{Nav, NavLink, PageChrome};
use crate::components::reveal::Reveal;
use crate::components::tilt::{supports_hover, Tilt, TiltKind};
use crate::components::video_modal::{VideoModalProvider, VideoThumb};

fn nav_links() -> Vec<NavLink> {
    [
        ("#producto", "Producto"),
        ("#demo", "Demo"),
        ("#galeria", "Galería"),
        ("#faq", "Preguntas"),
    ]
    .into_iter()
    .map(|(href, label)| NavLink {
        href: href.into(),
        label: label.into(),
    })
    .collect()
}

fn demo_steps() -> Vec<DemoStep> {
    vec![
        DemoStep {
            id: "captura".into(),
            label: "1. Captura".into(),
            content: html! {
                <Tilt kind={TiltKind::Screen}>
                    <h3>{"Todos tus pedidos en un solo lugar"}</h3>
                    <p>{"WhatsApp, correo y formularios llegan a una bandeja compartida."}</p>
                    <p class="demo-metric"><Counter count={1200} suffix="+" />{" pedidos al mes"}</p>
                </Tilt>
            },
        },
        DemoStep {
            id: "prioriza".into(),
            label: "2. Prioriza".into(),
            content: html! {
                <Tilt kind={TiltKind::Screen}>
                    <h3>{"Lo urgente primero"}</h3>
                    <p>{"Reglas simples ordenan cada pedido por fecha de entrega y cliente."}</p>
                    <p class="demo-metric"><Counter count={38} suffix="%" />{" menos retrasos"}</p>
                </Tilt>
            },
        },
        DemoStep {
            id: "entrega".into(),
            label: "3. Entrega".into(),
            content: html! {
                <Tilt kind={TiltKind::Screen}>
                    <h3>{"Seguimiento sin llamadas"}</h3>
                    <p>{"Tus clientes reciben el estado de su pedido automáticamente."}</p>
                    <p class="demo-metric"><Counter count={4} suffix="x" />{" más rápido"}</p>
                </Tilt>
            },
        },
    ]
}

fn faq_entries() -> Vec<FaqEntry> {
    [
        (
            "¿Necesito instalar algo?",
            "No. Funciona desde el navegador y se conecta a las herramientas que ya usas.",
        ),
        (
            "¿Cuánto tarda la puesta en marcha?",
            "La mayoría de los equipos quedan operando en menos de una semana.",
        ),
        (
            "¿Puedo cancelar cuando quiera?",
            "Sí. Los planes son mensuales y puedes exportar tus datos en cualquier momento.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| FaqEntry {
        question: question.into(),
        answer: html! { <p>{ answer }</p> },
    })
    .collect()
}

fn gallery_items() -> Vec<GalleryItem> {
    (1..=6)
        .map(|n| GalleryItem {
            src: format!("/assets/gallery/cliente-{}.jpg", n).into(),
            alt: format!("Equipo cliente {}", n).into(),
        })
        .collect()
}

fn contact_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "name".into(),
            label: "Nombre".into(),
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "email".into(),
            label: "Correo".into(),
            kind: FieldKind::Email,
            required: true,
        },
        FieldSpec {
            name: "company".into(),
            label: "Empresa".into(),
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            name: "phone".into(),
            label: "Teléfono".into(),
            kind: FieldKind::Tel,
            required: false,
        },
        FieldSpec {
            name: "message".into(),
            label: "¿Qué necesitas?".into(),
            kind: FieldKind::TextArea,
            required: false,
        },
    ]
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let nav_ref = use_node_ref();
    let hover = use_state(supports_hover);
    let chrome = PageChrome {
        nav: nav_ref,
        hover: *hover,
    };

    use_anchor_nav(chrome.clone());

    html! {
        <ContextProvider<PageChrome> context={chrome}>
            <VideoModalProvider>
                <Nav
                    brand="Pedidora"
                    links={nav_links()}
                    cta={NavLink { href: "#contacto".into(), label: "Agenda una demo".into() }}
                />
                <main class="landing-page">
                    <header id="inicio" class="hero">
                        <Reveal class="hero-content">
                            <h1>{"Gestiona pedidos sin perder el hilo"}</h1>
                            <p class="hero-subtitle">
                                {"Una bandeja para todo tu equipo, con prioridades claras y clientes informados."}
                            </p>
                            <div class="hero-cta-group">
                                <a href="#contacto" class="hero-cta">{"Quiero una demo"}</a>
                                <a href="#demo" class="hero-link">{"Ver cómo funciona"}</a>
                            </div>
                        </Reveal>
                        <Reveal class="hero-stats">
                            <Tilt kind={TiltKind::Chip}>
                                <Counter count={250} suffix="+" />
                                <span>{" equipos"}</span>
                            </Tilt>
                            <Tilt kind={TiltKind::Chip}>
                                <Counter count={98} suffix="%" />
                                <span>{" pedidos a tiempo"}</span>
                            </Tilt>
                            <Tilt kind={TiltKind::Chip}>
                                <Counter count={12} prefix="-" suffix="h" />
                                <span>{" de trabajo manual por semana"}</span>
                            </Tilt>
                        </Reveal>
                    </header>

                    <Reveal id="producto" class="section features">
                        <h2>{"Todo lo que tu equipo necesita"}</h2>
                        <div class="feature-grid">
                            <Tilt kind={TiltKind::Card}>
                                <h3>{"Bandeja compartida"}</h3>
                                <p>{"Cada pedido tiene un responsable y un estado visible para todos."}</p>
                            </Tilt>
                            <Tilt kind={TiltKind::Card}>
                                <h3>{"Alertas útiles"}</h3>
                                <p>{"Solo te avisamos cuando algo está por vencer."}</p>
                            </Tilt>
                            <Tilt kind={TiltKind::Card}>
                                <h3>{"Reportes semanales"}</h3>
                                <p>{"Mide tiempos de entrega sin armar planillas."}</p>
                            </Tilt>
                        </div>
                    </Reveal>

                    <Reveal class="section steps">
                        <h2>{"Empieza en tres pasos"}</h2>
                        <ol class="step-list">
                            <li>
                                <Tilt kind={TiltKind::Step}>
                                    <h3>{"Conecta tus canales"}</h3>
                                    <p>{"Vincula WhatsApp y tu correo en minutos."}</p>
                                </Tilt>
                            </li>
                            <li>
                                <Tilt kind={TiltKind::Step}>
                                    <h3>{"Invita a tu equipo"}</h3>
                                    <p>{"Asigna responsables por tipo de pedido."}</p>
                                </Tilt>
                            </li>
                            <li>
                                <Tilt kind={TiltKind::Step}>
                                    <h3>{"Entrega a tiempo"}</h3>
                                    <p>{"Sigue cada pedido hasta que llega al cliente."}</p>
                                </Tilt>
                            </li>
                        </ol>
                    </Reveal>

                    <Reveal id="demo" class="section">
                        <h2>{"Así se ve en el día a día"}</h2>
                        <DemoCycler steps={demo_steps()} />
                    </Reveal>

                    <Reveal id="videos" class="section videos">
                        <h2>{"Clientes que ya lo usan"}</h2>
                        <div class="video-grid">
                            <VideoThumb
                                video_id="KrVdJbHPB-o"
                                title="Panadería Sol: pedidos por WhatsApp"
                                href="https://www.youtube.com/watch?v=KrVdJbHPB-o"
                            >
                                <span class="video-thumb__label">{"Panadería Sol"}</span>
                            </VideoThumb>
                            <VideoThumb
                                video_id="dQw4w9WgXcQ"
                                title="Imprenta Norte: entregas a tiempo"
                                href="https://www.youtube.com/watch?v=dQw4w9WgXcQ"
                            >
                                <span class="video-thumb__label">{"Imprenta Norte"}</span>
                            </VideoThumb>
                        </div>
                        <Tilt kind={TiltKind::Quote}>
                            <blockquote>
                                {"“Dejamos de perder pedidos en el chat. Ahora todo el equipo sabe qué sigue.”"}
                            </blockquote>
                        </Tilt>
                    </Reveal>

                    <section id="galeria" class="section">
                        <Gallery items={gallery_items()} />
                    </section>

                    <Reveal id="faq" class="section faq">
                        <h2>{"Preguntas frecuentes"}</h2>
                        <Accordion items={faq_entries()} />
                    </Reveal>

                    <Reveal id="contacto" class="section contact">
                        <h2>{"Hablemos"}</h2>
                        <p>{"Déjanos tus datos y te mostramos la plataforma con tus propios pedidos."}</p>
                        <ContactForm fields={contact_fields()} />
                    </Reveal>
                </main>
            </VideoModalProvider>
        </ContextProvider<PageChrome>>
    }
}

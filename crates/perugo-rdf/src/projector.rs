use crate::{
    graph::{Graph, Literal},
    record::{DestinoRecord, FALLBACK_TOUR_LABEL, TourRecord, scalar_text},
    vocab,
};

/// Default user name when a request does not carry one
pub const DEFAULT_USER: &str = "Usuario123";

/// Build the interest graph of `user_name` over `destinations`
///
/// Records without a slug are skipped. A tours payload that cannot be
/// decoded drops only that destination's tours.
pub fn project<'a, I>(user_name: &str, destinations: I) -> Graph
where
    I: IntoIterator<Item = &'a DestinoRecord>,
{
    let mut graph = Graph::new();
    let user = user_node(&mut graph, user_name);

    for record in destinations {
        let Some(destino) = add_destino(&mut graph, record) else {
            tracing::warn!(nombre = record.nombre.as_deref().unwrap_or(""), "destination without slug skipped");
            continue;
        };

        graph.link(&user, vocab::EX_MOSTRO_INTERES_EN, &destino);

        let Some(tours) = &record.tours else {
            continue;
        };

        match tours.normalize() {
            Ok(tours) => {
                for tour in tours.iter() {
                    let tour_node = add_tour(&mut graph, tour);
                    graph.link(&destino, vocab::EX_OFRECE, &tour_node);
                }
            }
            Err(e) => {
                tracing::warn!(destino = %destino, "tours payload is not a valid list, skipping tours: {e}");
            }
        }
    }

    graph
}

fn user_node(graph: &mut Graph, user_name: &str) -> String {
    let user = vocab::node("Usuario", user_name);

    graph.link(&user, vocab::RDF_TYPE, vocab::FOAF_PERSON);
    graph.literal(&user, vocab::FOAF_NICK, Literal::string(user_name));

    user
}

/// Add a destination's own statements, `None` when it has no usable slug
fn add_destino(graph: &mut Graph, record: &DestinoRecord) -> Option<String> {
    let slug = record.slug.as_deref().filter(|s| !s.is_empty())?;
    let destino = vocab::node("Destino", slug);

    graph.link(&destino, vocab::RDF_TYPE, vocab::EX_DESTINO);

    if let Some(nombre) = &record.nombre {
        graph.literal(&destino, vocab::RDFS_LABEL, Literal::string(nombre.clone()));
    }

    for (field, literal) in record.fields() {
        if let Some(literal) = literal {
            graph.literal(&destino, &vocab::ex(field), literal);
        }
    }

    Some(destino)
}

fn add_tour(graph: &mut Graph, tour: &TourRecord) -> String {
    let key = tour.identifier().replace(' ', "_");
    let tour_node = vocab::node("Tour", &key);

    graph.link(&tour_node, vocab::RDF_TYPE, vocab::EX_TOUR);

    let label = tour
        .nombre
        .as_ref()
        .filter(|n| !n.is_null())
        .map_or_else(|| FALLBACK_TOUR_LABEL.to_owned(), |n| scalar_text(n).into_owned());
    graph.literal(&tour_node, vocab::RDFS_LABEL, Literal::string(label));

    if let Some(price) = tour.precio.as_ref().and_then(Literal::from_json) {
        graph.literal(&tour_node, vocab::EX_PRICE_USD, price);
    }

    if let Some(operator) = tour.operador.as_ref().and_then(Literal::from_json) {
        graph.literal(&tour_node, vocab::EX_OPERATOR, operator);
    }

    tour_node
}

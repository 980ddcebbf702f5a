//! End-to-end scenarios through the public `SocialGraph` API.

use std::collections::HashSet;
use std::sync::Arc;

use social_graph_core::{Distance, SocialError, SocialGraph, User};

struct Pythons {
    graph: SocialGraph,
    terry: Arc<User>,
    eric: Arc<User>,
    graham: Arc<User>,
    john: Arc<User>,
    michael: Arc<User>,
}

fn pythons() -> Pythons {
    let terry = Arc::new(User::new("Terry Gilliam"));
    let eric = Arc::new(User::new("Eric Idle"));
    let graham = Arc::new(User::new("Graham Chapman"));
    let john = Arc::new(User::new("John Cleese"));
    let michael = Arc::new(User::new("Michael Palin"));

    let mut graph = SocialGraph::new();
    for user in [&terry, &eric, &graham, &john, &michael] {
        graph.add_user(Arc::clone(user)).unwrap();
    }

    Pythons {
        graph,
        terry,
        eric,
        graham,
        john,
        michael,
    }
}

fn contents(posts: &[social_graph_core::Post]) -> Vec<String> {
    posts.iter().map(|p| p.content.clone()).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_add_get_and_delete_user() {
    let Pythons { mut graph, terry, .. } = pythons();

    assert_eq!(
        graph.add_user(terry.clone()),
        Err(SocialError::UserAlreadyExists(terry.id()))
    );
    graph.delete_user(terry.id()).unwrap();
    assert!(matches!(
        graph.get_user(terry.id()),
        Err(SocialError::UserDoesNotExist(_))
    ));
    assert!(matches!(
        graph.delete_user(terry.id()),
        Err(SocialError::UserDoesNotExist(_))
    ));
    graph.add_user(terry.clone()).unwrap();
    assert_eq!(graph.get_user(terry.id()).unwrap().id(), terry.id());
}

#[test]
fn test_following() {
    let Pythons {
        mut graph,
        terry,
        eric,
        ..
    } = pythons();

    graph.follow(terry.id(), eric.id()).unwrap();
    assert!(graph.is_following(terry.id(), eric.id()).unwrap());
    assert!(!graph.is_following(eric.id(), terry.id()).unwrap());
    assert_eq!(graph.following(terry.id()).unwrap(), HashSet::from([eric.id()]));
    assert_eq!(graph.followers(eric.id()).unwrap(), HashSet::from([terry.id()]));
}

#[test]
fn test_friends() {
    let Pythons {
        mut graph,
        terry,
        eric,
        ..
    } = pythons();

    graph.follow(terry.id(), eric.id()).unwrap();
    assert!(!graph.friends(terry.id()).unwrap().contains(&eric.id()));
    assert!(!graph.friends(eric.id()).unwrap().contains(&terry.id()));

    graph.follow(eric.id(), terry.id()).unwrap();
    assert!(graph.friends(terry.id()).unwrap().contains(&eric.id()));
    assert!(graph.friends(eric.id()).unwrap().contains(&terry.id()));
}

#[test]
fn test_distances() {
    let Pythons {
        mut graph,
        terry,
        eric,
        graham,
        john,
        michael,
    } = pythons();

    graph.follow(terry.id(), eric.id()).unwrap();
    graph.follow(terry.id(), graham.id()).unwrap();
    graph.follow(eric.id(), michael.id()).unwrap();
    graph.follow(eric.id(), john.id()).unwrap();
    graph.follow(john.id(), graham.id()).unwrap();

    assert_eq!(graph.max_distance(terry.id()).unwrap(), Distance::Hops(2));
    assert_eq!(graph.max_distance(eric.id()).unwrap(), Distance::Hops(2));
    assert_eq!(graph.min_distance(terry.id(), graham.id()).unwrap(), 1);
    assert_eq!(graph.min_distance(eric.id(), graham.id()).unwrap(), 2);

    assert_eq!(graph.max_distance(michael.id()).unwrap(), Distance::Unbounded);
    assert_eq!(
        graph.min_distance(graham.id(), terry.id()),
        Err(SocialError::users_not_connected(graham.id(), terry.id()))
    );
    assert_eq!(
        graph.min_distance(eric.id(), terry.id()),
        Err(SocialError::users_not_connected(eric.id(), terry.id()))
    );
}

#[test]
fn test_layer_followings() {
    let Pythons {
        mut graph,
        terry,
        eric,
        john,
        ..
    } = pythons();

    graph.follow(eric.id(), terry.id()).unwrap();
    graph.follow(terry.id(), john.id()).unwrap();
    assert_eq!(
        graph.nth_layer_followings(eric.id(), 2).unwrap(),
        HashSet::from([john.id()])
    );
    assert!(graph.nth_layer_followings(eric.id(), 5).unwrap().is_empty());
    assert!(graph.nth_layer_followings(john.id(), 1).unwrap().is_empty());
}

#[test]
fn test_feed() {
    let Pythons {
        mut graph,
        terry,
        eric,
        graham,
        john,
        michael,
    } = pythons();

    for followee in [&eric, &graham, &john, &michael] {
        graph.follow(terry.id(), followee.id()).unwrap();
    }
    for i in 0..10 {
        eric.add_post(i.to_string());
        graham.add_post((10 + i).to_string());
        john.add_post((20 + i).to_string());
        michael.add_post((30 + i).to_string());
    }

    assert_eq!(
        contents(&graph.generate_feed(terry.id(), 0, 10).unwrap()),
        strings(&["39", "29", "19", "9", "38", "28", "18", "8", "37", "27"])
    );
    assert_eq!(
        contents(&graph.generate_feed(terry.id(), 10, 10).unwrap()),
        strings(&["17", "7", "36", "26", "16", "6", "35", "25", "15", "5"])
    );
    assert_eq!(
        contents(&graph.generate_feed(terry.id(), 20, 10).unwrap()),
        strings(&["34", "24", "14", "4", "33", "23", "13", "3", "32", "22"])
    );
    assert_eq!(
        contents(&graph.generate_feed(terry.id(), 30, 10).unwrap()),
        strings(&["12", "2", "31", "21", "11", "1", "30", "20", "10", "0"])
    );
    assert_eq!(graph.generate_feed(terry.id(), 35, 10).unwrap().len(), 5);
    assert!(graph.generate_feed(terry.id(), 40, 10).unwrap().is_empty());

    // Same data, same page.
    assert_eq!(
        graph.generate_feed(terry.id(), 10, 10).unwrap(),
        graph.generate_feed(terry.id(), 10, 10).unwrap()
    );

    for (user, base) in [(&eric, 0), (&graham, 10), (&john, 20), (&michael, 30)] {
        let posts = user.posts();
        let log: Vec<String> = posts.iter().map(|p| p.content.clone()).collect();
        let expected: Vec<String> = (base..base + 10).map(|i: i32| i.to_string()).collect();
        assert_eq!(log, expected);
    }
}

#[test]
fn test_user_post_log() {
    let michael = User::new("Michael Palin");
    let terry = User::new("Terry Gilliam");

    michael.add_post("larodi");
    let post = michael.posts().iter().next().cloned().unwrap();
    assert_eq!(post.author, michael.id());
    assert_eq!(post.content, "larodi");

    for _ in 0..102 {
        terry.add_post("spam");
    }
    let posts = terry.posts();
    assert!(posts.iter().all(|p| p.content == "spam"));
    assert_eq!(posts.iter().count(), 50);
}

#[test]
fn test_feed_after_followee_deleted() {
    let Pythons {
        mut graph,
        terry,
        eric,
        graham,
        ..
    } = pythons();

    graph.follow(terry.id(), eric.id()).unwrap();
    graph.follow(terry.id(), graham.id()).unwrap();
    eric.add_post("from eric");
    graham.add_post("from graham");

    graph.delete_user(eric.id()).unwrap();
    assert_eq!(
        contents(&graph.generate_feed(terry.id(), 0, 10).unwrap()),
        strings(&["from graham"])
    );
    assert_eq!(graph.following(terry.id()).unwrap(), HashSet::from([graham.id()]));
}
